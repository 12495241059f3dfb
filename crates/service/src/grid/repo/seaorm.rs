use async_trait::async_trait;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Select};

use models::grid_record::{self, Entity as GridEntity};
use models::Grid;

use crate::errors::ServiceError;
use crate::grid::repository::{GridCollection, GridFilter};

/// Postgres-backed collection over the `grids` table.
pub struct SeaOrmGridCollection {
    pub db: DatabaseConnection,
}

impl SeaOrmGridCollection {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

fn select(filter: &GridFilter) -> Select<GridEntity> {
    match filter {
        GridFilter::All => GridEntity::find(),
        GridFilter::Id(id) => GridEntity::find_by_id(id.to_hex()),
        GridFilter::RoomId(room) => GridEntity::find().filter(grid_record::Column::RoomId.eq(room.as_str())),
    }
}

#[async_trait]
impl GridCollection for SeaOrmGridCollection {
    async fn find(&self, filter: &GridFilter) -> Result<Vec<Grid>, ServiceError> {
        let rows = select(filter)
            .order_by_asc(grid_record::Column::Id)
            .all(&self.db)
            .await?;
        rows.into_iter()
            .map(|m| Grid::try_from(m).map_err(ServiceError::from))
            .collect()
    }

    async fn insert_one(&self, grid: Grid) -> Result<(), ServiceError> {
        let am = grid_record::ActiveModel::try_from(&grid)?;
        GridEntity::insert(am).exec(&self.db).await?;
        Ok(())
    }

    async fn delete_one(&self, filter: &GridFilter) -> Result<u64, ServiceError> {
        let id = match filter {
            GridFilter::Id(id) => id.to_hex(),
            other => match select(other).order_by_asc(grid_record::Column::Id).one(&self.db).await? {
                Some(row) => row.id,
                None => return Ok(0),
            },
        };
        let res = GridEntity::delete_by_id(id).exec(&self.db).await?;
        Ok(res.rows_affected)
    }

    async fn count(&self, filter: &GridFilter) -> Result<u64, ServiceError> {
        Ok(select(filter).count(&self.db).await?)
    }
}
