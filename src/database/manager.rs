use sqlx::{postgres::PgPoolOptions, PgPool};
use std::time::Duration;
use thiserror::Error;
use tracing::info;

use crate::config::DatabaseConfig;

/// Errors from the store layer
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Missing configuration: {0}")]
    ConfigMissing(&'static str),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

const CREATE_MOVIES: &str = "CREATE TABLE IF NOT EXISTS movies (
    id UUID PRIMARY KEY,
    seq BIGSERIAL NOT NULL,
    doc JSONB NOT NULL DEFAULT '{}'::jsonb
)";

const CREATE_MOVIES_SEQ_INDEX: &str = "CREATE INDEX IF NOT EXISTS idx_movies_seq ON movies (seq)";

const CREATE_USERS: &str = "CREATE TABLE IF NOT EXISTS users (
    id UUID PRIMARY KEY,
    username TEXT NOT NULL UNIQUE,
    password_hash TEXT NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now()
)";

/// Builds the Postgres pool and makes sure the tables exist
pub struct DatabaseManager;

impl DatabaseManager {
    pub async fn connect(config: &DatabaseConfig) -> Result<PgPool, DatabaseError> {
        let url = config
            .url
            .as_deref()
            .ok_or(DatabaseError::ConfigMissing("DATABASE_URL"))?;

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.connection_timeout))
            .connect(url)
            .await?;

        Self::bootstrap(&pool).await?;
        info!(max_connections = config.max_connections, "Created database pool");
        Ok(pool)
    }

    async fn bootstrap(pool: &PgPool) -> Result<(), DatabaseError> {
        for stmt in [CREATE_MOVIES, CREATE_MOVIES_SEQ_INDEX, CREATE_USERS] {
            sqlx::query(stmt).execute(pool).await?;
        }
        Ok(())
    }

    /// Pings the pool to ensure connectivity
    pub async fn health_check(pool: &PgPool) -> Result<(), DatabaseError> {
        sqlx::query("SELECT 1").execute(pool).await?;
        Ok(())
    }
}
