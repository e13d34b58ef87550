use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::manager::DatabaseError;
use super::models::{Movie, MovieFields, NewUser, User};
use super::store::{MovieStore, UserStore};

/// In-process store for development and tests. Movies keep insertion order.
#[derive(Default)]
pub struct MemoryStore {
    movies: RwLock<Vec<Movie>>,
    users: RwLock<HashMap<String, User>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MovieStore for MemoryStore {
    async fn create(&self, fields: MovieFields) -> Result<Movie, DatabaseError> {
        let movie = Movie::new(fields);
        self.movies.write().await.push(movie.clone());
        Ok(movie)
    }

    async fn find_all(&self) -> Result<Vec<Movie>, DatabaseError> {
        Ok(self.movies.read().await.clone())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Movie>, DatabaseError> {
        Ok(self.movies.read().await.iter().find(|m| m.id == id).cloned())
    }

    async fn update_by_id(&self, id: Uuid, patch: MovieFields) -> Result<Option<Movie>, DatabaseError> {
        let mut movies = self.movies.write().await;
        let Some(movie) = movies.iter_mut().find(|m| m.id == id) else {
            return Ok(None);
        };
        movie.fields.merge(patch);
        Ok(Some(movie.clone()))
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<bool, DatabaseError> {
        let mut movies = self.movies.write().await;
        let before = movies.len();
        movies.retain(|m| m.id != id);
        Ok(movies.len() < before)
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DatabaseError> {
        Ok(self.users.read().await.get(username).cloned())
    }

    async fn insert(&self, user: NewUser) -> Result<User, DatabaseError> {
        let mut users = self.users.write().await;
        if users.contains_key(&user.username) {
            return Err(DatabaseError::Conflict(format!(
                "username '{}' already exists",
                user.username
            )));
        }
        let user = user.into_user();
        users.insert(user.username.clone(), user.clone());
        Ok(user)
    }
}
