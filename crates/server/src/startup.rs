use std::{future::Future, net::SocketAddr};

use axum::Router;
use configs::AppConfig;
use migration::MigratorTrait;
use sea_orm::DatabaseConnection;
use tower_http::cors::CorsLayer;
use tracing::info;

use models::audit::Auditor;

use crate::{routes, state::ServerState};

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Connect to the configured database and bring its schema up to date.
pub async fn connect_database(cfg: &AppConfig) -> anyhow::Result<DatabaseConnection> {
    let db = models::db::connect_with_config(&cfg.database).await?;
    if cfg.database.auto_migrate {
        migration::Migrator::up(&db, None).await?;
        info!("database migrations applied");
    }
    Ok(db)
}

/// Router with state built from `db` and the configured audit actor.
pub fn build_app(cfg: &AppConfig, db: DatabaseConnection) -> Router {
    let auditor = Auditor::new(cfg.audit.actor.clone());
    info!(actor = auditor.actor(), "audit stamps attributed");
    let state = ServerState::new(db, auditor);
    routes::build_router(state, build_cors())
}

/// Serve until `shutdown` resolves, then drain in-flight requests.
pub async fn run(cfg: AppConfig, shutdown: impl Future<Output = ()> + Send + 'static) -> anyhow::Result<()> {
    let db = connect_database(&cfg).await?;
    let app = build_app(&cfg, db.clone());

    let addr: SocketAddr = cfg.server.bind_addr().parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "playlist api listening");
    axum::serve(listener, app).with_graceful_shutdown(shutdown).await?;

    db.close().await?;
    info!("database pool closed");
    Ok(())
}
