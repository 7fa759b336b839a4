use sea_orm::DatabaseConnection;
use tracing::{info, instrument};

use models::artist;
use models::audit::Auditor;
use models::validation::{self, ValidationErrors};

use crate::domain::{Artist, ArtistInput};
use crate::errors::ServiceError;
use crate::tx::{begin_read, begin_write};

/// Artist use cases. Every call runs in its own transaction.
#[derive(Clone)]
pub struct ArtistService {
    db: DatabaseConnection,
    auditor: Auditor,
}

impl ArtistService {
    pub fn new(db: DatabaseConnection, auditor: Auditor) -> Self {
        Self { db, auditor }
    }

    /// All artists, oldest first.
    #[instrument(skip(self))]
    pub async fn list_all(&self) -> Result<Vec<Artist>, ServiceError> {
        let txn = begin_read(&self.db).await?;
        let rows = artist::list(&txn).await?;
        txn.commit().await?;
        Ok(rows.into_iter().map(Artist::from).collect())
    }

    #[instrument(skip(self))]
    pub async fn get_by_id(&self, id: i64) -> Result<Artist, ServiceError> {
        let txn = begin_read(&self.db).await?;
        let found = artist::find(&txn, id).await?;
        txn.commit().await?;
        found.map(Artist::from).ok_or_else(|| ServiceError::not_found("artist", id))
    }

    /// Validate and insert a new artist. Any `id` on the input is ignored.
    ///
    /// # Examples
    /// ```
    /// use configs::DatabaseConfig;
    /// use migration::MigratorTrait;
    /// use models::audit::Auditor;
    /// use service::artist_service::ArtistService;
    /// use service::domain::ArtistInput;
    ///
    /// tokio_test::block_on(async {
    ///     let db = models::db::connect_with_config(&DatabaseConfig::sqlite_memory()).await.unwrap();
    ///     migration::Migrator::up(&db, None).await.unwrap();
    ///     let svc = ArtistService::new(db, Auditor::new("docs"));
    ///     let input = ArtistInput { name: Some("Artist #1".into()), popularity: Some(80), ..Default::default() };
    ///     let created = svc.create(input).await.unwrap();
    ///     assert_eq!(created.name, "Artist #1");
    ///     assert_eq!(created.audit.created_by, "docs");
    /// });
    /// ```
    #[instrument(skip(self, input), fields(name = ?input.name))]
    pub async fn create(&self, input: ArtistInput) -> Result<Artist, ServiceError> {
        let fields = artist::validate_fields(input.name.as_deref(), input.popularity)?;
        let txn = begin_write(&self.db).await?;
        let created = artist::create(&txn, &self.auditor, fields).await?;
        txn.commit().await?;
        info!(artist_id = created.id, "artist_created");
        Ok(created.into())
    }

    /// Overwrite name and popularity of the artist named by `input.id`.
    #[instrument(skip(self, input), fields(id = ?input.id))]
    pub async fn update(&self, input: ArtistInput) -> Result<Artist, ServiceError> {
        let mut errs = ValidationErrors::default();
        let id = errs.collect(validation::required("id", input.id));
        let fields = errs.merge(artist::validate_fields(input.name.as_deref(), input.popularity));
        let (id, fields) = match (id, fields) {
            (Some(id), Some(fields)) => (id, fields),
            _ => return Err(errs.into()),
        };

        let txn = begin_write(&self.db).await?;
        let existing = artist::find(&txn, id)
            .await?
            .ok_or_else(|| ServiceError::not_found("artist", id))?;
        let updated = artist::overwrite(&txn, &self.auditor, existing, fields).await?;
        txn.commit().await?;
        info!(artist_id = id, "artist_updated");
        Ok(updated.into())
    }

    /// Delete the artist and every song that references it.
    #[instrument(skip(self))]
    pub async fn delete_by_id(&self, id: i64) -> Result<(), ServiceError> {
        let txn = begin_write(&self.db).await?;
        if artist::find(&txn, id).await?.is_none() {
            return Err(ServiceError::not_found("artist", id));
        }
        let songs = artist::delete_cascade(&txn, id).await?;
        txn.commit().await?;
        info!(artist_id = id, songs_removed = songs, "artist_deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::get_db;

    fn input(name: &str, popularity: i64) -> ArtistInput {
        ArtistInput { id: None, name: Some(name.into()), popularity: Some(popularity) }
    }

    async fn service() -> anyhow::Result<ArtistService> {
        Ok(ArtistService::new(get_db().await?, Auditor::new("tester")))
    }

    #[tokio::test]
    async fn create_then_get_round_trips() -> anyhow::Result<()> {
        let svc = service().await?;
        let created = svc.create(input("Artist #1", 80)).await?;
        assert!(created.id > 0);
        assert_eq!(created.name, "Artist #1");
        assert_eq!(created.popularity, 80);
        assert_eq!(created.audit.created_by, "tester");
        assert_eq!(created.audit.created_at, created.audit.updated_at);

        let fetched = svc.get_by_id(created.id).await?;
        assert_eq!(fetched, created);
        Ok(())
    }

    #[tokio::test]
    async fn create_ignores_client_id() -> anyhow::Result<()> {
        let svc = service().await?;
        let mut i = input("Artist #1", 10);
        i.id = Some(999);
        let created = svc.create(i).await?;
        assert_ne!(created.id, 999);
        Ok(())
    }

    #[tokio::test]
    async fn list_is_empty_then_ordered() -> anyhow::Result<()> {
        let svc = service().await?;
        assert!(svc.list_all().await?.is_empty());
        let a = svc.create(input("First", 1)).await?;
        let b = svc.create(input("Second", 2)).await?;
        let ids: Vec<_> = svc.list_all().await?.into_iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![a.id, b.id]);
        Ok(())
    }

    #[tokio::test]
    async fn create_rejects_out_of_range_fields() -> anyhow::Result<()> {
        let svc = service().await?;
        let long = "x".repeat(51);
        for (name, pop) in [("ab", 50), (long.as_str(), 50), ("Artist", -1), ("Artist", 101)] {
            let err = svc.create(input(name, pop)).await.unwrap_err();
            assert!(err.field_errors().is_some(), "{name}/{pop} should fail validation");
        }
        svc.create(input("abc", 0)).await?;
        svc.create(input(&"x".repeat(50), 100)).await?;
        assert_eq!(svc.list_all().await?.len(), 2);
        Ok(())
    }

    #[tokio::test]
    async fn update_overwrites_fields() -> anyhow::Result<()> {
        let svc = service().await?;
        let created = svc.create(input("Artist #1", 80)).await?;
        let updated = svc
            .update(ArtistInput { id: Some(created.id), name: Some("Renamed".into()), popularity: Some(20) })
            .await?;
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.name, "Renamed");
        assert_eq!(updated.popularity, 20);
        assert_eq!(updated.audit.created_at, created.audit.created_at);
        assert_eq!(svc.get_by_id(created.id).await?, updated);
        Ok(())
    }

    #[tokio::test]
    async fn update_requires_id_and_valid_fields() -> anyhow::Result<()> {
        let svc = service().await?;
        let err = svc.update(ArtistInput { id: None, name: Some("S".into()), popularity: Some(5) }).await.unwrap_err();
        let fields: Vec<_> = err.field_errors().unwrap().errors().iter().map(|e| e.field.clone()).collect();
        assert_eq!(fields, vec!["id", "name"]);
        Ok(())
    }

    #[tokio::test]
    async fn update_enforces_popularity_range() -> anyhow::Result<()> {
        let svc = service().await?;
        let created = svc.create(input("Artist #1", 80)).await?;
        let with_popularity = |popularity| ArtistInput {
            id: Some(created.id),
            name: Some("Artist #1".into()),
            popularity: Some(popularity),
        };

        for (popularity, rule) in [(-1, "Min"), (101, "Max")] {
            let err = svc.update(with_popularity(popularity)).await.unwrap_err();
            let errs = err.field_errors().unwrap().errors();
            assert_eq!(errs.len(), 1);
            assert_eq!(errs[0].field, "popularity");
            assert_eq!(errs[0].message, format!("{rule}: popularity must be between 0 and 100"));
        }
        assert_eq!(svc.get_by_id(created.id).await?.popularity, 80);

        assert_eq!(svc.update(with_popularity(0)).await?.popularity, 0);
        assert_eq!(svc.update(with_popularity(100)).await?.popularity, 100);
        Ok(())
    }

    #[tokio::test]
    async fn missing_ids_are_not_found() -> anyhow::Result<()> {
        let svc = service().await?;
        assert!(matches!(svc.get_by_id(42).await, Err(ServiceError::NotFound(_))));
        assert!(matches!(svc.delete_by_id(42).await, Err(ServiceError::NotFound(_))));
        let err = svc
            .update(ArtistInput { id: Some(42), name: Some("Nobody".into()), popularity: Some(1) })
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Not found artist with id = 42");
        Ok(())
    }

    #[tokio::test]
    async fn delete_removes_artist() -> anyhow::Result<()> {
        let svc = service().await?;
        let created = svc.create(input("Short Lived", 3)).await?;
        svc.delete_by_id(created.id).await?;
        assert!(matches!(svc.get_by_id(created.id).await, Err(ServiceError::NotFound(_))));
        assert!(matches!(svc.delete_by_id(created.id).await, Err(ServiceError::NotFound(_))));
        Ok(())
    }
}
