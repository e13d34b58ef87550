use async_trait::async_trait;
use uuid::Uuid;

use super::manager::DatabaseError;
use super::models::{Movie, MovieFields, NewUser, User};

/// Persistence for favourite movies.
///
/// `find_all` returns documents in insertion order. `update_by_id` merges only
/// the fields present in `patch` and returns the merged document.
#[async_trait]
pub trait MovieStore: Send + Sync {
    async fn create(&self, fields: MovieFields) -> Result<Movie, DatabaseError>;

    async fn find_all(&self) -> Result<Vec<Movie>, DatabaseError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Movie>, DatabaseError>;

    async fn update_by_id(&self, id: Uuid, patch: MovieFields) -> Result<Option<Movie>, DatabaseError>;

    /// `true` when the movie existed and was removed
    async fn delete_by_id(&self, id: Uuid) -> Result<bool, DatabaseError>;
}

/// Persistence for login identities
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DatabaseError>;

    /// Fails with `DatabaseError::Conflict` when the username is taken
    async fn insert(&self, user: NewUser) -> Result<User, DatabaseError>;
}
