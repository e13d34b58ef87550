// handlers/protected/movies/list.rs - GET /get_movies handler

use axum::{extract::State, Extension, Json};
use tracing::info;

use crate::app::AppState;
use crate::database::models::Movie;
use crate::error::ApiError;
use crate::middleware::AuthUser;

use super::store_failure;

/// An empty collection answers 404 rather than `[]`; clients depend on it.
pub async fn movie_list(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Vec<Movie>>, ApiError> {
    let movies = state
        .movies
        .find_all()
        .await
        .map_err(|e| store_failure("movie_list", e))?;

    if movies.is_empty() {
        info!(user = %user.username, "Favourite movies not found");
        return Err(ApiError::not_found("No favourite movies found"));
    }

    info!(user = %user.username, count = movies.len(), "Favourite movies found");
    Ok(Json(movies))
}
