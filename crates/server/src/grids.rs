use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use models::Grid;
use service::grid::{GridCollection, GridService};
use tracing::info;

use crate::errors::JsonApiError;

/// Shared handler state: one grid service over the configured collection.
#[derive(Clone)]
pub struct AppState {
    pub grids: Arc<GridService<dyn GridCollection>>,
}

impl AppState {
    pub fn new(grids: GridService<dyn GridCollection>) -> Self {
        Self { grids: Arc::new(grids) }
    }
}

#[utoipa::path(
    get, path = "/api/grids", tag = "grids",
    responses((status = 200, description = "All grids", body = [crate::openapi::GridDoc]))
)]
pub async fn list(
    State(state): State<AppState>,
    Query(filters): Query<HashMap<String, String>>,
) -> Result<(StatusCode, Json<Vec<Grid>>), JsonApiError> {
    let res = state.grids.get_grids(&filters).await?;
    Ok((res.status, Json(res.body)))
}

#[utoipa::path(
    get, path = "/api/grids/{id}", tag = "grids",
    params(("id" = String, Path, description = "24 hex character grid id")),
    responses(
        (status = 200, description = "OK", body = crate::openapi::GridDoc),
        (status = 400, description = "Illegal id", body = crate::openapi::ErrorDoc),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn get(State(state): State<AppState>, Path(id): Path<String>) -> Result<(StatusCode, Json<Grid>), JsonApiError> {
    let res = state.grids.get_grid(&id).await?;
    Ok((res.status, Json(res.body)))
}

#[utoipa::path(
    get, path = "/api/grids/room/{room_id}", tag = "grids",
    params(("room_id" = String, Path, description = "Room key")),
    responses((status = 200, description = "Grids in the room, possibly none", body = [crate::openapi::GridDoc]))
)]
pub async fn list_by_room(
    State(state): State<AppState>,
    Path(room_id): Path<String>,
) -> Result<(StatusCode, Json<Vec<Grid>>), JsonApiError> {
    let res = state.grids.get_grids_by_room(&room_id).await?;
    Ok((res.status, Json(res.body)))
}

/// The body is taken as raw bytes so malformed JSON gets the grid validation error.
#[utoipa::path(
    post, path = "/api/grids", tag = "grids",
    request_body = crate::openapi::SaveGridRequestDoc,
    responses(
        (status = 201, description = "Created", body = crate::openapi::GridDoc),
        (status = 400, description = "Malformed body", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn save(State(state): State<AppState>, body: Bytes) -> Result<(StatusCode, Json<Grid>), JsonApiError> {
    let res = state.grids.save_grid(&body).await?;
    info!(id = %res.body.id, room_id = %res.body.room_id, "created grid");
    Ok((res.status, Json(res.body)))
}

#[utoipa::path(
    delete, path = "/api/grids/{id}", tag = "grids",
    params(("id" = String, Path, description = "24 hex character grid id")),
    responses(
        (status = 200, description = "Deleted"),
        (status = 400, description = "Illegal id", body = crate::openapi::ErrorDoc),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn delete(State(state): State<AppState>, Path(id): Path<String>) -> Result<StatusCode, JsonApiError> {
    let res = state.grids.delete_grid(&id).await?;
    info!(id = %id, "deleted grid");
    Ok(res.status)
}
