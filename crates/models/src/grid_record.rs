use sea_orm::{entity::prelude::*, Set};
use serde::{Deserialize, Serialize};

use crate::{errors::ModelError, grid::Grid, object_id::ObjectId};

/// Row shape of the `grids` table. Cells are kept as a JSON document.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "grids")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub room_id: String,
    pub name: Option<String>,
    pub grid: Json,
    pub last_saved: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl TryFrom<Model> for Grid {
    type Error = ModelError;

    fn try_from(m: Model) -> Result<Self, Self::Error> {
        let id = ObjectId::parse_str(&m.id)?;
        let grid = serde_json::from_value(m.grid)
            .map_err(|e| ModelError::Decode(format!("grid {}: {}", m.id, e)))?;
        Ok(Grid {
            id,
            room_id: m.room_id,
            name: m.name,
            grid,
            last_saved: m.last_saved.map(Into::into),
        })
    }
}

impl TryFrom<&Grid> for ActiveModel {
    type Error = ModelError;

    fn try_from(g: &Grid) -> Result<Self, Self::Error> {
        let cells = serde_json::to_value(&g.grid).map_err(|e| ModelError::Decode(e.to_string()))?;
        Ok(ActiveModel {
            id: Set(g.id.to_hex()),
            room_id: Set(g.room_id.clone()),
            name: Set(g.name.clone()),
            grid: Set(cells),
            last_saved: Set(g.last_saved.map(Into::into)),
        })
    }
}
