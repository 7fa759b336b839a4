use serde::{Deserialize, Serialize};

use models::audit::Audit;
use models::song::SongCategory;
use models::{artist, song};

/// Artist as returned to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artist {
    pub id: i64,
    pub name: String,
    pub popularity: i64,
    #[serde(flatten)]
    pub audit: Audit,
}

/// Song with its artist embedded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Song {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub category: SongCategory,
    pub duration: Option<String>,
    pub artist: Artist,
    #[serde(flatten)]
    pub audit: Audit,
}

/// Create/update request for an artist. Missing fields surface as field errors.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ArtistInput {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub popularity: Option<i64>,
}

/// Create/update request for a song; `artist_id` is resolved by the service.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SongInput {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub duration: Option<String>,
    #[serde(default)]
    pub artist_id: Option<i64>,
}

impl From<artist::Model> for Artist {
    fn from(m: artist::Model) -> Self {
        let audit = m.audit();
        Self { id: m.id, name: m.name, popularity: m.popularity, audit }
    }
}

impl From<(song::Model, artist::Model)> for Song {
    fn from((s, a): (song::Model, artist::Model)) -> Self {
        let audit = s.audit();
        Self {
            id: s.id,
            title: s.title,
            description: s.description,
            category: s.category,
            duration: s.duration,
            artist: a.into(),
            audit,
        }
    }
}
