// handlers/protected/movies/delete.rs - DELETE /delete_movie/:id handler

use axum::{
    extract::{Path, State},
    Extension, Json,
};
use serde_json::{json, Value};
use tracing::info;

use crate::app::AppState;
use crate::error::ApiError;
use crate::middleware::AuthUser;

use super::{parse_movie_id, store_failure, MOVIE_NOT_FOUND};

pub async fn movie_delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Value>, ApiError> {
    let id = parse_movie_id(&id)?;

    let deleted = state
        .movies
        .delete_by_id(id)
        .await
        .map_err(|e| store_failure("movie_delete", e))?;

    if !deleted {
        return Err(ApiError::not_found(MOVIE_NOT_FOUND));
    }

    info!(user = %user.username, movie_id = %id, "Favourite movie deleted");
    Ok(Json(json!({ "message": "Favourite movie deleted successfully" })))
}
