use std::sync::Arc;
use thiserror::Error;
use tokio::task;
use tracing::info;

use crate::auth::password::{hash_password, verify_password, HashError};
use crate::auth::{TokenError, TokenIssuer};
use crate::database::models::{NewUser, User};
use crate::database::{DatabaseError, UserStore};

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("{0}")]
    InvalidInput(&'static str),

    #[error("User already exists")]
    UserExists,

    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error(transparent)]
    Token(#[from] TokenError),

    #[error(transparent)]
    Hash(#[from] HashError),

    #[error("Password worker failed: {0}")]
    Join(#[from] task::JoinError),

    #[error(transparent)]
    Database(DatabaseError),
}

impl From<DatabaseError> for AuthError {
    fn from(err: DatabaseError) -> Self {
        match err {
            DatabaseError::Conflict(_) => AuthError::UserExists,
            other => AuthError::Database(other),
        }
    }
}

/// Registers identities and exchanges valid credentials for tokens
pub struct CredentialService {
    users: Arc<dyn UserStore>,
    tokens: Arc<dyn TokenIssuer>,
}

impl CredentialService {
    pub fn new(users: Arc<dyn UserStore>, tokens: Arc<dyn TokenIssuer>) -> Self {
        Self { users, tokens }
    }

    pub async fn register(&self, username: &str, password: &str) -> Result<User, AuthError> {
        let username = validate(username, password)?;

        // insert() still enforces uniqueness under concurrent registrations
        if self.users.find_by_username(username).await?.is_some() {
            return Err(AuthError::UserExists);
        }

        // Argon2 is CPU-bound; keep it off the async workers
        let owned = password.to_string();
        let password_hash = task::spawn_blocking(move || hash_password(&owned)).await??;
        let user = self
            .users
            .insert(NewUser { username: username.to_string(), password_hash })
            .await?;

        info!(user_id = %user.id, username = %user.username, "User registered");
        Ok(user)
    }

    pub async fn login(&self, username: &str, password: &str) -> Result<String, AuthError> {
        let username = validate(username, password)?;

        let user = self
            .users
            .find_by_username(username)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        let (hash, owned) = (user.password_hash.clone(), password.to_string());
        if !task::spawn_blocking(move || verify_password(&hash, &owned)).await? {
            return Err(AuthError::InvalidCredentials);
        }

        let token = self.tokens.issue(&user)?;
        info!(user_id = %user.id, "User logged in");
        Ok(token)
    }
}

fn validate<'a>(username: &'a str, password: &str) -> Result<&'a str, AuthError> {
    let username = username.trim();
    if username.is_empty() {
        return Err(AuthError::InvalidInput("Username is required"));
    }
    if password.is_empty() {
        return Err(AuthError::InvalidInput("Password is required"));
    }
    Ok(username)
}
