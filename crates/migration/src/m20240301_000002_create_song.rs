//! Create `song` table with FK to `artist`.
//!
//! Removing an artist removes its songs (`ON DELETE CASCADE`).
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Song::Table)
                    .if_not_exists()
                    .col(big_integer(Song::Id).auto_increment().primary_key())
                    .col(string_len(Song::Title, 50).not_null())
                    .col(string_len(Song::Description, 50).not_null())
                    .col(string_len(Song::Category, 16).not_null())
                    // free-form "mm:ss"; nullable on purpose
                    .col(
                        ColumnDef::new(Song::Duration)
                            .string_len(16)
                            .null(),
                    )
                    .col(big_integer(Song::ArtistId).not_null())
                    .col(timestamp_with_time_zone(Song::CreatedAt).not_null())
                    .col(string_len(Song::CreatedBy, 64).not_null())
                    .col(timestamp_with_time_zone(Song::UpdatedAt).not_null())
                    .col(string_len(Song::UpdatedBy, 64).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_song_artist")
                            .from(Song::Table, Song::ArtistId)
                            .to(Artist::Table, Artist::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Song::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Song {
    Table,
    Id,
    Title,
    Description,
    Category,
    Duration,
    ArtistId,
    CreatedAt,
    CreatedBy,
    UpdatedAt,
    UpdatedBy,
}

#[derive(DeriveIden)]
enum Artist { Table, Id }
