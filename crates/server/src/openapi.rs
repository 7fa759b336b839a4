use serde::Serialize;
use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct ArtistDoc {
    pub id: i64,
    pub name: String,
    pub popularity: i64,
    /// RFC 3339, millisecond precision
    pub created_at: String,
    pub created_by: String,
    pub updated_at: String,
    pub updated_by: String,
}

#[derive(ToSchema)]
pub struct SongDoc {
    pub id: i64,
    pub title: String,
    pub description: String,
    /// POP, ROCK, JAZZ, CLASSICAL, BLUES or RAP
    pub category: String,
    pub duration: Option<String>,
    pub artist: ArtistDoc,
    pub created_at: String,
    pub created_by: String,
    pub updated_at: String,
    pub updated_by: String,
}

#[derive(ToSchema)]
pub struct ArtistInputDoc {
    /// Ignored on create, required on update
    pub id: Option<i64>,
    pub name: Option<String>,
    pub popularity: Option<i64>,
}

#[derive(ToSchema)]
pub struct SongInputDoc {
    /// Ignored on create, required on update
    pub id: Option<i64>,
    pub title: Option<String>,
    pub description: Option<String>,
    /// Category name, any case
    pub category: Option<String>,
    pub duration: Option<String>,
    pub artist_id: Option<i64>,
}

#[derive(Serialize, ToSchema)]
pub struct FieldErrorDoc { pub field: String, pub message: String }

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ErrorDoc {
    pub error: String,
    pub message: Option<String>,
    pub field_errors: Option<Vec<FieldErrorDoc>>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::artists::list,
        crate::routes::artists::get,
        crate::routes::artists::create,
        crate::routes::artists::update,
        crate::routes::artists::delete,
        crate::routes::songs::list,
        crate::routes::songs::list_by_category,
        crate::routes::songs::list_by_artist_name,
        crate::routes::songs::get,
        crate::routes::songs::create,
        crate::routes::songs::update,
        crate::routes::songs::delete,
    ),
    components(
        schemas(
            HealthResponse,
            ArtistDoc,
            SongDoc,
            ArtistInputDoc,
            SongInputDoc,
            FieldErrorDoc,
            ErrorDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "artists"),
        (name = "songs")
    )
)]
pub struct ApiDoc;
