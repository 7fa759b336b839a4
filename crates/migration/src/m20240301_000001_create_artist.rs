//! Create `artist` table.
//!
//! Parent side of the artist/song relation; ids come from the store.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Artist::Table)
                    .if_not_exists()
                    .col(big_integer(Artist::Id).auto_increment().primary_key())
                    .col(string_len(Artist::Name, 50).not_null())
                    .col(big_integer(Artist::Popularity).not_null())
                    .col(timestamp_with_time_zone(Artist::CreatedAt).not_null())
                    .col(string_len(Artist::CreatedBy, 64).not_null())
                    .col(timestamp_with_time_zone(Artist::UpdatedAt).not_null())
                    .col(string_len(Artist::UpdatedBy, 64).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Artist::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Artist { Table, Id, Name, Popularity, CreatedAt, CreatedBy, UpdatedAt, UpdatedBy }
