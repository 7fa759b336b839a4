use sea_orm::DatabaseConnection;
use tracing::{info, instrument};

use models::audit::Auditor;
use models::song::{self, SongCategory, SongFields, SongFilter};
use models::validation::{self, ValidationErrors};
use models::artist;

use crate::domain::{Song, SongInput};
use crate::errors::ServiceError;
use crate::tx::{begin_read, begin_write};

/// Song use cases; reads come back with the owning artist embedded.
#[derive(Clone)]
pub struct SongService {
    db: DatabaseConnection,
    auditor: Auditor,
}

fn validate(input: &SongInput) -> Result<SongFields, ValidationErrors> {
    song::validate_fields(
        input.title.as_deref(),
        input.description.as_deref(),
        input.category.as_deref(),
        input.duration.as_deref(),
        input.artist_id,
    )
}

impl SongService {
    pub fn new(db: DatabaseConnection, auditor: Auditor) -> Self {
        Self { db, auditor }
    }

    async fn list(&self, filter: SongFilter) -> Result<Vec<Song>, ServiceError> {
        let txn = begin_read(&self.db).await?;
        let rows = song::list_with_artist(&txn, filter).await?;
        txn.commit().await?;
        Ok(rows.into_iter().map(Song::from).collect())
    }

    #[instrument(skip(self))]
    pub async fn list_all(&self) -> Result<Vec<Song>, ServiceError> {
        self.list(SongFilter::All).await
    }

    /// Songs in the category named by `category` (any case). An unknown name is NotFound.
    #[instrument(skip(self))]
    pub async fn list_by_category(&self, category: &str) -> Result<Vec<Song>, ServiceError> {
        let parsed = SongCategory::from_name_ignore_case(category)
            .ok_or_else(|| ServiceError::category_not_found(category))?;
        self.list(SongFilter::Category(parsed)).await
    }

    /// Songs whose artist name equals `name` exactly.
    #[instrument(skip(self))]
    pub async fn list_by_artist_name(&self, name: &str) -> Result<Vec<Song>, ServiceError> {
        self.list(SongFilter::ArtistName(name.to_string())).await
    }

    #[instrument(skip(self))]
    pub async fn get_by_id(&self, id: i64) -> Result<Song, ServiceError> {
        let txn = begin_read(&self.db).await?;
        let found = song::find_with_artist(&txn, id).await?;
        txn.commit().await?;
        found.map(Song::from).ok_or_else(|| ServiceError::not_found("song", id))
    }

    #[instrument(skip(self, input), fields(artist_id = ?input.artist_id))]
    pub async fn create(&self, input: SongInput) -> Result<Song, ServiceError> {
        let fields = validate(&input)?;
        let txn = begin_write(&self.db).await?;
        let owner = artist::find(&txn, fields.artist_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("artist", fields.artist_id))?;
        let created = song::create(&txn, &self.auditor, fields).await?;
        txn.commit().await?;
        info!(song_id = created.id, artist_id = owner.id, "song_created");
        Ok((created, owner).into())
    }

    /// Overwrite every mutable column of the song named by `input.id`.
    /// The artist is resolved before the song.
    #[instrument(skip(self, input), fields(id = ?input.id, artist_id = ?input.artist_id))]
    pub async fn update(&self, input: SongInput) -> Result<Song, ServiceError> {
        let mut errs = ValidationErrors::default();
        let id = errs.collect(validation::required("id", input.id));
        let fields = errs.merge(validate(&input));
        let (id, fields) = match (id, fields) {
            (Some(id), Some(fields)) => (id, fields),
            _ => return Err(errs.into()),
        };

        let txn = begin_write(&self.db).await?;
        let owner = artist::find(&txn, fields.artist_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("artist", fields.artist_id))?;
        let existing = song::find(&txn, id)
            .await?
            .ok_or_else(|| ServiceError::not_found("song", id))?;
        let updated = song::overwrite(&txn, &self.auditor, existing, fields).await?;
        txn.commit().await?;
        info!(song_id = id, artist_id = owner.id, "song_updated");
        Ok((updated, owner).into())
    }

    #[instrument(skip(self))]
    pub async fn delete_by_id(&self, id: i64) -> Result<(), ServiceError> {
        let txn = begin_write(&self.db).await?;
        if !song::delete(&txn, id).await? {
            return Err(ServiceError::not_found("song", id));
        }
        txn.commit().await?;
        info!(song_id = id, "song_deleted");
        Ok(())
    }
}
