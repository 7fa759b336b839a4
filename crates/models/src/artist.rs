use sea_orm::{entity::prelude::*, ConnectionTrait, QueryOrder, Set};
use serde::{Deserialize, Serialize};

use crate::audit::{self, Audit, Audited, Auditor};
use crate::errors::ModelError;
use crate::validation::{self, ValidationErrors};

pub const NAME_MIN: usize = 3;
pub const NAME_MAX: usize = 50;
pub const POPULARITY_MIN: i64 = 0;
pub const POPULARITY_MAX: i64 = 100;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "artist")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    pub popularity: i64,
    pub created_at: DateTimeWithTimeZone,
    pub created_by: String,
    pub updated_at: DateTimeWithTimeZone,
    pub updated_by: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::song::Entity")]
    Song,
}

impl Related<super::song::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Song.def()
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

/// Mutable artist columns that passed validation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArtistFields {
    pub name: String,
    pub popularity: i64,
}

pub fn validate_fields(name: Option<&str>, popularity: Option<i64>) -> Result<ArtistFields, ValidationErrors> {
    let mut errs = ValidationErrors::default();
    let name = errs.collect(validation::text("name", name, NAME_MIN, NAME_MAX));
    let popularity = errs.collect(validation::bounded("popularity", popularity, POPULARITY_MIN, POPULARITY_MAX));
    match (name, popularity) {
        (Some(name), Some(popularity)) => Ok(ArtistFields { name, popularity }),
        _ => Err(errs),
    }
}

pub async fn create<C: ConnectionTrait>(db: &C, auditor: &Auditor, fields: ArtistFields) -> Result<Model, ModelError> {
    let am = ActiveModel {
        name: Set(fields.name),
        popularity: Set(fields.popularity),
        ..Default::default()
    };
    audit::insert_audited(db, auditor, am).await
}

/// Overwrite name and popularity of an existing row; songs are left untouched.
pub async fn overwrite<C: ConnectionTrait>(
    db: &C,
    auditor: &Auditor,
    existing: Model,
    fields: ArtistFields,
) -> Result<Model, ModelError> {
    let mut am: ActiveModel = existing.into();
    am.name = Set(fields.name);
    am.popularity = Set(fields.popularity);
    audit::update_audited(db, auditor, am).await
}

pub async fn find<C: ConnectionTrait>(db: &C, id: i64) -> Result<Option<Model>, ModelError> {
    Ok(Entity::find_by_id(id).one(db).await?)
}

/// All artists in insertion order.
pub async fn list<C: ConnectionTrait>(db: &C) -> Result<Vec<Model>, ModelError> {
    Ok(Entity::find().order_by_asc(Column::Id).all(db).await?)
}

/// Delete an artist together with its songs; returns the number of songs removed.
///
/// Songs are deleted explicitly so the cascade holds even on connections
/// where foreign-key enforcement is off.
pub async fn delete_cascade<C: ConnectionTrait>(db: &C, id: i64) -> Result<u64, ModelError> {
    let songs = super::song::Entity::delete_many()
        .filter(super::song::Column::ArtistId.eq(id))
        .exec(db)
        .await?;
    Entity::delete_by_id(id).exec(db).await?;
    Ok(songs.rows_affected)
}
