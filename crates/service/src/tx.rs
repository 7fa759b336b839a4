//! One transaction per service call.
//!
//! Reads open a read-only transaction where the backend supports it; SQLite
//! has no per-transaction access mode, so it gets a plain one.

use sea_orm::{
    AccessMode, ConnectionTrait, DatabaseBackend, DatabaseConnection, DatabaseTransaction, DbErr, TransactionTrait,
};

pub async fn begin_read(db: &DatabaseConnection) -> Result<DatabaseTransaction, DbErr> {
    match db.get_database_backend() {
        DatabaseBackend::Postgres => db.begin_with_config(None, Some(AccessMode::ReadOnly)).await,
        _ => db.begin().await,
    }
}

/// Commits only when the caller calls `commit()`; dropping the handle rolls back.
pub async fn begin_write(db: &DatabaseConnection) -> Result<DatabaseTransaction, DbErr> {
    db.begin().await
}
