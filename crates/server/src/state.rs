use sea_orm::DatabaseConnection;

use models::audit::Auditor;
use service::artist_service::ArtistService;
use service::song_service::SongService;

/// Shared handler state: one service per resource over a common pool.
#[derive(Clone)]
pub struct ServerState {
    pub artists: ArtistService,
    pub songs: SongService,
}

impl ServerState {
    pub fn new(db: DatabaseConnection, auditor: Auditor) -> Self {
        Self {
            artists: ArtistService::new(db.clone(), auditor.clone()),
            songs: SongService::new(db, auditor),
        }
    }
}
