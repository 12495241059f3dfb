//! Create `grids` table.
//! One row per saved grid document; cells are stored as JSON.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Grids::Table)
                    .if_not_exists()
                    .col(char_len(Grids::Id, 24).primary_key())
                    .col(string_len(Grids::RoomId, 256).not_null())
                    .col(string_len_null(Grids::Name, 256))
                    .col(json(Grids::Grid).not_null())
                    .col(timestamp_with_time_zone_null(Grids::LastSaved))
                    .to_owned(),
            )
            .await?;

        // Grids are listed per room
        manager
            .create_index(
                Index::create()
                    .name("idx_grids_room_id")
                    .table(Grids::Table)
                    .col(Grids::RoomId)
                    .if_not_exists()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Grids::Table).if_exists().to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Grids {
    Table,
    Id,
    RoomId,
    Name,
    Grid,
    LastSaved,
}
