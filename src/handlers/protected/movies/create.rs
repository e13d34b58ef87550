// handlers/protected/movies/create.rs - POST /add_movie handler

use axum::{extract::State, http::StatusCode, Extension, Json};
use tracing::info;

use crate::app::AppState;
use crate::database::models::{Movie, MovieFields};
use crate::error::ApiError;
use crate::middleware::AuthUser;

use super::store_failure;

/// Every call stores a new movie; identical payloads are not deduplicated.
pub async fn movie_create(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(fields): Json<MovieFields>,
) -> Result<(StatusCode, Json<Movie>), ApiError> {
    let movie = state
        .movies
        .create(fields)
        .await
        .map_err(|e| store_failure("movie_create", e))?;

    info!(user = %user.username, movie_id = %movie.id, "Favourite movie added");
    Ok((StatusCode::CREATED, Json(movie)))
}
