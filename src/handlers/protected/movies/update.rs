// handlers/protected/movies/update.rs - PUT /update_movie/:id handler

use axum::{
    extract::{Path, State},
    Extension, Json,
};
use tracing::info;

use crate::app::AppState;
use crate::database::models::{Movie, MovieFields};
use crate::error::ApiError;
use crate::middleware::AuthUser;

use super::{parse_movie_id, store_failure, MOVIE_NOT_FOUND};

/// Fields left out of the body (or sent as null) keep their stored values.
pub async fn movie_update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Extension(user): Extension<AuthUser>,
    Json(patch): Json<MovieFields>,
) -> Result<Json<Movie>, ApiError> {
    let id = parse_movie_id(&id)?;

    let movie = state
        .movies
        .update_by_id(id, patch)
        .await
        .map_err(|e| store_failure("movie_update", e))?
        .ok_or_else(|| ApiError::not_found(MOVIE_NOT_FOUND))?;

    info!(user = %user.username, movie_id = %movie.id, "Favourite movie updated");
    Ok(Json(movie))
}
