// handlers/protected/movies/show.rs - GET /get_movie/:id handler

use axum::{
    extract::{Path, State},
    Extension, Json,
};
use tracing::info;

use crate::app::AppState;
use crate::database::models::Movie;
use crate::error::ApiError;
use crate::middleware::AuthUser;

use super::{parse_movie_id, store_failure, MOVIE_NOT_FOUND};

pub async fn movie_show(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Movie>, ApiError> {
    let id = parse_movie_id(&id)?;

    let movie = state
        .movies
        .find_by_id(id)
        .await
        .map_err(|e| store_failure("movie_show", e))?
        .ok_or_else(|| ApiError::not_found(MOVIE_NOT_FOUND))?;

    info!(user = %user.username, movie_id = %movie.id, "Favourite movie found");
    Ok(Json(movie))
}
