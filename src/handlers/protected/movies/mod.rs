// handlers/protected/movies/mod.rs - Favourite movie handlers
//
// CRUD over the movie store. All routes sit behind the JWT middleware, so
// every handler can rely on an `AuthUser` extension being present.

use tracing::error;
use uuid::Uuid;

use crate::database::DatabaseError;
use crate::error::ApiError;

pub mod create; // POST /add_movie
pub mod delete; // DELETE /delete_movie/:id
pub mod list;   // GET /get_movies
pub mod show;   // GET /get_movie/:id
pub mod update; // PUT /update_movie/:id

pub use create::movie_create;
pub use delete::movie_delete;
pub use list::movie_list;
pub use show::movie_show;
pub use update::movie_update;

const MOVIE_NOT_FOUND: &str = "Movie not found";

/// A path id that isn't a UUID can't name a stored movie
fn parse_movie_id(id: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(id).map_err(|_| ApiError::not_found(MOVIE_NOT_FOUND))
}

/// Log the store failure against the handler and hide it behind a 500
fn store_failure(handler: &'static str, err: DatabaseError) -> ApiError {
    error!("Error found in {}: {}", handler, err);
    ApiError::internal_server_error()
}
