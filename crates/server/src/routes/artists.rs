use axum::{
    extract::{rejection::{JsonRejection, PathRejection}, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tracing::info;

use service::domain::{Artist, ArtistInput};

use crate::{errors::JsonApiError, state::ServerState};

#[utoipa::path(
    get, path = "/api/artists", tag = "artists",
    responses(
        (status = 200, description = "All artists", body = [crate::openapi::ArtistDoc]),
        (status = 204, description = "No artists stored")
    )
)]
pub async fn list(State(state): State<ServerState>) -> Result<Response, JsonApiError> {
    let artists = state.artists.list_all().await?;
    if artists.is_empty() {
        return Ok(StatusCode::NO_CONTENT.into_response());
    }
    Ok(Json(artists).into_response())
}

#[utoipa::path(
    get, path = "/api/artists/{id}", tag = "artists",
    params(("id" = i64, Path, description = "Artist ID")),
    responses(
        (status = 200, description = "OK", body = crate::openapi::ArtistDoc),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn get(
    State(state): State<ServerState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<Artist>, JsonApiError> {
    let Path(id) = id?;
    Ok(Json(state.artists.get_by_id(id).await?))
}

#[utoipa::path(
    post, path = "/api/artists", tag = "artists",
    request_body = crate::openapi::ArtistInputDoc,
    responses(
        (status = 201, description = "Created", body = crate::openapi::ArtistDoc),
        (status = 400, description = "Validation Error", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn create(
    State(state): State<ServerState>,
    payload: Result<Json<ArtistInput>, JsonRejection>,
) -> Result<(StatusCode, Json<Artist>), JsonApiError> {
    let Json(input) = payload?;
    let created = state.artists.create(input).await?;
    info!(id = %created.id, name = %created.name, "created artist");
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    put, path = "/api/artists", tag = "artists",
    request_body = crate::openapi::ArtistInputDoc,
    responses(
        (status = 200, description = "Updated", body = crate::openapi::ArtistDoc),
        (status = 400, description = "Validation Error", body = crate::openapi::ErrorDoc),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn update(
    State(state): State<ServerState>,
    payload: Result<Json<ArtistInput>, JsonRejection>,
) -> Result<Json<Artist>, JsonApiError> {
    let Json(input) = payload?;
    let updated = state.artists.update(input).await?;
    info!(id = %updated.id, name = %updated.name, "updated artist");
    Ok(Json(updated))
}

#[utoipa::path(
    delete, path = "/api/artists/{id}", tag = "artists",
    params(("id" = i64, Path, description = "Artist ID")),
    responses(
        (status = 200, description = "Deleted together with its songs"),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn delete(
    State(state): State<ServerState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<StatusCode, JsonApiError> {
    let Path(id) = id?;
    state.artists.delete_by_id(id).await?;
    info!(id = %id, "deleted artist");
    Ok(StatusCode::OK)
}
