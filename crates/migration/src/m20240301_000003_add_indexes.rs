use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Song: lookups by owning artist (cascade, list by artist name)
        manager
            .create_index(
                Index::create()
                    .name("idx_song_artist")
                    .table(Song::Table)
                    .col(Song::ArtistId)
                    .to_owned(),
            )
            .await?;

        // Song: list by category
        manager
            .create_index(
                Index::create()
                    .name("idx_song_category")
                    .table(Song::Table)
                    .col(Song::Category)
                    .to_owned(),
            )
            .await?;

        // Artist: exact-name match
        manager
            .create_index(
                Index::create()
                    .name("idx_artist_name")
                    .table(Artist::Table)
                    .col(Artist::Name)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_song_artist").table(Song::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_song_category").table(Song::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_artist_name").table(Artist::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Song { Table, ArtistId, Category }

#[derive(DeriveIden)]
enum Artist { Table, Name }
