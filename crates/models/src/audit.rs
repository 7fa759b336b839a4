//! Audit stamps carried by every persisted entity.
//!
//! The storage layer routes all writes through [`insert_audited`] and
//! [`update_audited`], which ask the [`Auditor`] to stamp the active model
//! before it reaches the database. Inserts set both the created and updated
//! pairs; updates only touch the updated pair.

use chrono::{SubsecRound, Utc};
use sea_orm::{
    entity::prelude::DateTimeWithTimeZone, ActiveModelBehavior, ActiveModelTrait, ConnectionTrait,
    EntityTrait, IntoActiveModel,
};
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Audit {
    pub created_at: DateTimeWithTimeZone,
    pub created_by: String,
    pub updated_at: DateTimeWithTimeZone,
    pub updated_by: String,
}

/// Active models whose audit columns can be stamped.
pub trait Audited {
    fn stamp_created(&mut self, at: DateTimeWithTimeZone, by: &str);
    fn stamp_updated(&mut self, at: DateTimeWithTimeZone, by: &str);
}

/// Supplies the actor name and clock for audit stamps.
#[derive(Clone, Debug)]
pub struct Auditor {
    actor: String,
}

impl Auditor {
    pub fn new(actor: impl Into<String>) -> Self {
        Self { actor: actor.into() }
    }

    pub fn actor(&self) -> &str {
        &self.actor
    }

    fn now(&self) -> DateTimeWithTimeZone {
        Utc::now().trunc_subsecs(3).into()
    }

    pub fn on_insert<A: Audited>(&self, am: &mut A) {
        let now = self.now();
        am.stamp_created(now, &self.actor);
        am.stamp_updated(now, &self.actor);
    }

    pub fn on_update<A: Audited>(&self, am: &mut A) {
        am.stamp_updated(self.now(), &self.actor);
    }
}

impl Default for Auditor {
    fn default() -> Self {
        Self::new("system")
    }
}

/// Insert `am` after stamping all four audit columns.
pub async fn insert_audited<A, C>(
    conn: &C,
    auditor: &Auditor,
    mut am: A,
) -> Result<<A::Entity as EntityTrait>::Model, ModelError>
where
    A: ActiveModelTrait + ActiveModelBehavior + Audited + Send,
    <A::Entity as EntityTrait>::Model: IntoActiveModel<A>,
    C: ConnectionTrait,
{
    auditor.on_insert(&mut am);
    Ok(am.insert(conn).await?)
}

/// Update `am` after refreshing the `updated_*` audit columns.
pub async fn update_audited<A, C>(
    conn: &C,
    auditor: &Auditor,
    mut am: A,
) -> Result<<A::Entity as EntityTrait>::Model, ModelError>
where
    A: ActiveModelTrait + ActiveModelBehavior + Audited + Send,
    <A::Entity as EntityTrait>::Model: IntoActiveModel<A>,
    C: ConnectionTrait,
{
    auditor.on_update(&mut am);
    Ok(am.update(conn).await?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Stamped {
        created: Option<(DateTimeWithTimeZone, String)>,
        updated: Option<(DateTimeWithTimeZone, String)>,
    }

    impl Audited for Stamped {
        fn stamp_created(&mut self, at: DateTimeWithTimeZone, by: &str) {
            self.created = Some((at, by.to_string()));
        }
        fn stamp_updated(&mut self, at: DateTimeWithTimeZone, by: &str) {
            self.updated = Some((at, by.to_string()));
        }
    }

    #[test]
    fn insert_stamps_both_pairs_with_same_instant() {
        let mut p = Stamped::default();
        Auditor::new("alice").on_insert(&mut p);
        let (c_at, c_by) = p.created.unwrap();
        let (u_at, u_by) = p.updated.unwrap();
        assert_eq!(c_at, u_at);
        assert_eq!(c_by, "alice");
        assert_eq!(u_by, "alice");
    }

    #[test]
    fn update_leaves_created_alone() {
        let mut p = Stamped::default();
        Auditor::default().on_update(&mut p);
        assert!(p.created.is_none());
        assert_eq!(p.updated.unwrap().1, "system");
    }

    #[test]
    fn default_actor_is_system() {
        assert_eq!(Auditor::default().actor(), "system");
        assert_eq!(Auditor::new("importer").actor(), "importer");
    }

    #[test]
    fn stamps_are_millisecond_precision() {
        let mut p = Stamped::default();
        Auditor::default().on_insert(&mut p);
        let (at, _) = p.created.unwrap();
        assert_eq!(at.timestamp_subsec_nanos() % 1_000_000, 0);
    }
}
