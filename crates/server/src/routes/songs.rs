use axum::{
    extract::{rejection::{JsonRejection, PathRejection}, Path, State},
    http::StatusCode,
    Json,
};
use tracing::info;

use service::domain::{Song, SongInput};

use crate::{errors::JsonApiError, state::ServerState};

#[utoipa::path(
    get, path = "/api/songs", tag = "songs",
    responses((status = 200, description = "All songs, possibly empty", body = [crate::openapi::SongDoc]))
)]
pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<Song>>, JsonApiError> {
    Ok(Json(state.songs.list_all().await?))
}

#[utoipa::path(
    get, path = "/api/songs/category/{category}", tag = "songs",
    params(("category" = String, Path, description = "Category name, any case")),
    responses(
        (status = 200, description = "Songs in the category", body = [crate::openapi::SongDoc]),
        (status = 404, description = "Unknown category", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn list_by_category(
    State(state): State<ServerState>,
    category: Result<Path<String>, PathRejection>,
) -> Result<Json<Vec<Song>>, JsonApiError> {
    let Path(category) = category?;
    Ok(Json(state.songs.list_by_category(&category).await?))
}

#[utoipa::path(
    get, path = "/api/songs/artist/{name}", tag = "songs",
    params(("name" = String, Path, description = "Exact artist name")),
    responses((status = 200, description = "Songs by the artist, possibly empty", body = [crate::openapi::SongDoc]))
)]
pub async fn list_by_artist_name(
    State(state): State<ServerState>,
    name: Result<Path<String>, PathRejection>,
) -> Result<Json<Vec<Song>>, JsonApiError> {
    let Path(name) = name?;
    Ok(Json(state.songs.list_by_artist_name(&name).await?))
}

#[utoipa::path(
    get, path = "/api/songs/{id}", tag = "songs",
    params(("id" = i64, Path, description = "Song ID")),
    responses(
        (status = 200, description = "OK", body = crate::openapi::SongDoc),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn get(
    State(state): State<ServerState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<Song>, JsonApiError> {
    let Path(id) = id?;
    Ok(Json(state.songs.get_by_id(id).await?))
}

#[utoipa::path(
    post, path = "/api/songs", tag = "songs",
    request_body = crate::openapi::SongInputDoc,
    responses(
        (status = 201, description = "Created", body = crate::openapi::SongDoc),
        (status = 400, description = "Validation Error", body = crate::openapi::ErrorDoc),
        (status = 404, description = "Artist not found", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn create(
    State(state): State<ServerState>,
    payload: Result<Json<SongInput>, JsonRejection>,
) -> Result<(StatusCode, Json<Song>), JsonApiError> {
    let Json(input) = payload?;
    let created = state.songs.create(input).await?;
    info!(id = %created.id, artist_id = %created.artist.id, category = %created.category, "created song");
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    put, path = "/api/songs", tag = "songs",
    request_body = crate::openapi::SongInputDoc,
    responses(
        (status = 200, description = "Updated", body = crate::openapi::SongDoc),
        (status = 400, description = "Validation Error", body = crate::openapi::ErrorDoc),
        (status = 404, description = "Song or artist not found", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn update(
    State(state): State<ServerState>,
    payload: Result<Json<SongInput>, JsonRejection>,
) -> Result<Json<Song>, JsonApiError> {
    let Json(input) = payload?;
    let updated = state.songs.update(input).await?;
    info!(id = %updated.id, artist_id = %updated.artist.id, "updated song");
    Ok(Json(updated))
}

#[utoipa::path(
    delete, path = "/api/songs/{id}", tag = "songs",
    params(("id" = i64, Path, description = "Song ID")),
    responses(
        (status = 200, description = "Deleted"),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn delete(
    State(state): State<ServerState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<StatusCode, JsonApiError> {
    let Path(id) = id?;
    state.songs.delete_by_id(id).await?;
    info!(id = %id, "deleted song");
    Ok(StatusCode::OK)
}
