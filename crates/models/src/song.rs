use std::fmt;

use sea_orm::{entity::prelude::*, ConnectionTrait, QueryOrder, Select, Set};
use serde::{Deserialize, Serialize};

use crate::artist;
use crate::audit::{self, Audit, Audited, Auditor};
use crate::errors::ModelError;
use crate::validation::{self, FieldError, ValidationErrors};

pub const TEXT_MIN: usize = 3;
pub const TEXT_MAX: usize = 50;

/// Closed set of genre tags; stored as the upper-case name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[serde(rename_all = "UPPERCASE")]
pub enum SongCategory {
    #[sea_orm(string_value = "POP")]
    Pop,
    #[sea_orm(string_value = "ROCK")]
    Rock,
    #[sea_orm(string_value = "JAZZ")]
    Jazz,
    #[sea_orm(string_value = "CLASSICAL")]
    Classical,
    #[sea_orm(string_value = "BLUES")]
    Blues,
    #[sea_orm(string_value = "RAP")]
    Rap,
}

impl SongCategory {
    pub const ALL: [SongCategory; 6] = [
        SongCategory::Pop,
        SongCategory::Rock,
        SongCategory::Jazz,
        SongCategory::Classical,
        SongCategory::Blues,
        SongCategory::Rap,
    ];

    pub fn name(self) -> &'static str {
        match self {
            SongCategory::Pop => "POP",
            SongCategory::Rock => "ROCK",
            SongCategory::Jazz => "JAZZ",
            SongCategory::Classical => "CLASSICAL",
            SongCategory::Blues => "BLUES",
            SongCategory::Rap => "RAP",
        }
    }

    /// Case-insensitive lookup by name; `None` for anything outside the set.
    ///
    /// ```
    /// use models::song::SongCategory;
    /// assert_eq!(SongCategory::from_name_ignore_case("pop"), Some(SongCategory::Pop));
    /// assert_eq!(SongCategory::from_name_ignore_case("popy"), None);
    /// ```
    pub fn from_name_ignore_case(text: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.name().eq_ignore_ascii_case(text))
    }
}

impl fmt::Display for SongCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "song")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub title: String,
    pub description: String,
    pub category: SongCategory,
    pub duration: Option<String>,
    pub artist_id: i64,
    pub created_at: DateTimeWithTimeZone,
    pub created_by: String,
    pub updated_at: DateTimeWithTimeZone,
    pub updated_by: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::artist::Entity",
        from = "Column::ArtistId",
        to = "super::artist::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Artist,
}

impl Related<super::artist::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Artist.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Audited for ActiveModel {
    fn stamp_created(&mut self, at: DateTimeWithTimeZone, by: &str) {
        self.created_at = Set(at);
        self.created_by = Set(by.to_string());
    }

    fn stamp_updated(&mut self, at: DateTimeWithTimeZone, by: &str) {
        self.updated_at = Set(at);
        self.updated_by = Set(by.to_string());
    }
}

impl Model {
    pub fn audit(&self) -> Audit {
        Audit {
            created_at: self.created_at,
            created_by: self.created_by.clone(),
            updated_at: self.updated_at,
            updated_by: self.updated_by.clone(),
        }
    }
}

/// Mutable song columns that passed validation. `artist_id` is not yet resolved.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SongFields {
    pub title: String,
    pub description: String,
    pub category: SongCategory,
    pub duration: Option<String>,
    pub artist_id: i64,
}

fn category(value: Option<&str>) -> Result<SongCategory, FieldError> {
    let text = validation::required("category", value)?;
    SongCategory::from_name_ignore_case(text).ok_or_else(|| {
        let known: Vec<&str> = SongCategory::ALL.iter().map(|c| c.name()).collect();
        FieldError::new("category", "Enum", format_args!("category must be one of {}", known.join(", ")))
    })
}

pub fn validate_fields(
    title: Option<&str>,
    description: Option<&str>,
    category_text: Option<&str>,
    duration: Option<&str>,
    artist_id: Option<i64>,
) -> Result<SongFields, ValidationErrors> {
    let mut errs = ValidationErrors::default();
    let title = errs.collect(validation::text("title", title, TEXT_MIN, TEXT_MAX));
    let description = errs.collect(validation::text("description", description, TEXT_MIN, TEXT_MAX));
    let category = errs.collect(category(category_text));
    let artist_id = errs.collect(validation::required("artist_id", artist_id));
    match (title, description, category, artist_id) {
        (Some(title), Some(description), Some(category), Some(artist_id)) => Ok(SongFields {
            title,
            description,
            category,
            duration: duration.map(str::to_string),
            artist_id,
        }),
        _ => Err(errs),
    }
}

/// Insert a song; the caller has already resolved `fields.artist_id`.
pub async fn create<C: ConnectionTrait>(db: &C, auditor: &Auditor, fields: SongFields) -> Result<Model, ModelError> {
    let am = ActiveModel {
        title: Set(fields.title),
        description: Set(fields.description),
        category: Set(fields.category),
        duration: Set(fields.duration),
        artist_id: Set(fields.artist_id),
        ..Default::default()
    };
    audit::insert_audited(db, auditor, am).await
}

pub async fn overwrite<C: ConnectionTrait>(
    db: &C,
    auditor: &Auditor,
    existing: Model,
    fields: SongFields,
) -> Result<Model, ModelError> {
    let mut am: ActiveModel = existing.into();
    am.title = Set(fields.title);
    am.description = Set(fields.description);
    am.category = Set(fields.category);
    am.duration = Set(fields.duration);
    am.artist_id = Set(fields.artist_id);
    audit::update_audited(db, auditor, am).await
}

pub async fn find<C: ConnectionTrait>(db: &C, id: i64) -> Result<Option<Model>, ModelError> {
    Ok(Entity::find_by_id(id).one(db).await?)
}

pub async fn delete<C: ConnectionTrait>(db: &C, id: i64) -> Result<bool, ModelError> {
    let res = Entity::delete_by_id(id).exec(db).await?;
    Ok(res.rows_affected > 0)
}

/// Row filters for the song listings.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SongFilter {
    All,
    Id(i64),
    Category(SongCategory),
    ArtistName(String),
}

impl SongFilter {
    fn apply(self, select: Select<Entity>) -> Select<Entity> {
        match self {
            SongFilter::All => select,
            SongFilter::Id(id) => select.filter(Column::Id.eq(id)),
            SongFilter::Category(c) => select.filter(Column::Category.eq(c)),
            SongFilter::ArtistName(name) => select.filter(artist::Column::Name.eq(name)),
        }
    }
}

/// Songs joined with their artist, in insertion order.
pub async fn list_with_artist<C: ConnectionTrait>(
    db: &C,
    filter: SongFilter,
) -> Result<Vec<(Model, artist::Model)>, ModelError> {
    let rows = filter
        .apply(Entity::find())
        .find_also_related(artist::Entity)
        .order_by_asc(Column::Id)
        .all(db)
        .await?;
    rows.into_iter()
        .map(|(song, artist)| match artist {
            Some(a) => Ok((song, a)),
            None => Err(ModelError::Db(format!("song {} references missing artist {}", song.id, song.artist_id))),
        })
        .collect()
}

pub async fn find_with_artist<C: ConnectionTrait>(db: &C, id: i64) -> Result<Option<(Model, artist::Model)>, ModelError> {
    Ok(list_with_artist(db, SongFilter::Id(id)).await?.into_iter().next())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_lookup_ignores_case() {
        assert_eq!(SongCategory::from_name_ignore_case("POP"), Some(SongCategory::Pop));
        assert_eq!(SongCategory::from_name_ignore_case("pop"), Some(SongCategory::Pop));
        assert_eq!(SongCategory::from_name_ignore_case("Classical"), Some(SongCategory::Classical));
        assert_eq!(SongCategory::from_name_ignore_case("popy"), None);
        assert_eq!(SongCategory::from_name_ignore_case(""), None);
        assert_eq!(SongCategory::from_name_ignore_case(" pop "), None);
    }

    #[test]
    fn category_serializes_upper_case() {
        assert_eq!(serde_json::to_string(&SongCategory::Jazz).unwrap(), "\"JAZZ\"");
        for c in SongCategory::ALL {
            assert_eq!(serde_json::to_value(c).unwrap(), serde_json::json!(c.name()));
        }
    }

    #[test]
    fn validate_song_fields() {
        let f = validate_fields(Some("For The Lover That I Lost"), Some("Live At Abbey Road Studios"), Some("pop"), Some("3:01"), Some(7)).unwrap();
        assert_eq!(f.category, SongCategory::Pop);
        assert_eq!(f.duration.as_deref(), Some("3:01"));
        assert_eq!(f.artist_id, 7);
    }

    #[test]
    fn validate_song_reports_all_failing_fields() {
        let errs = validate_fields(Some("S"), None, Some("polka"), None, None).unwrap_err();
        let fields: Vec<_> = errs.errors().iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["title", "description", "category", "artist_id"]);
        assert_eq!(errs.errors()[0].message, "Size: title must be between 3 and 50 characters");
        assert_eq!(errs.errors()[1].message, "NotBlank: description must not be null or blank");
        assert!(errs.errors()[2].message.starts_with("Enum: category must be one of POP, ROCK"));
        assert_eq!(errs.errors()[3].message, "NotNull: artist_id must not be null");
    }

    #[test]
    fn duration_is_free_form() {
        let f = validate_fields(Some("Title"), Some("Description"), Some("ROCK"), Some("not a time"), Some(1)).unwrap();
        assert_eq!(f.duration.as_deref(), Some("not a time"));
        let f = validate_fields(Some("Title"), Some("Description"), Some("ROCK"), None, Some(1)).unwrap();
        assert!(f.duration.is_none());
    }
}
