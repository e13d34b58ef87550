use async_trait::async_trait;
use sqlx::{types::Json, FromRow, PgPool};
use uuid::Uuid;

use super::manager::DatabaseError;
use super::models::{Movie, MovieFields, NewUser, User};
use super::store::{MovieStore, UserStore};

/// Postgres-backed store. Movies live as JSONB documents so partial updates
/// are a single `doc || patch` merge.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct MovieRow {
    id: Uuid,
    doc: Json<MovieFields>,
}

impl From<MovieRow> for Movie {
    fn from(row: MovieRow) -> Self {
        Movie { id: row.id, fields: row.doc.0 }
    }
}

#[async_trait]
impl MovieStore for PgStore {
    async fn create(&self, fields: MovieFields) -> Result<Movie, DatabaseError> {
        let row = sqlx::query_as::<_, MovieRow>(
            "INSERT INTO movies (id, doc) VALUES ($1, $2) RETURNING id, doc",
        )
        .bind(Uuid::new_v4())
        .bind(Json(fields))
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }

    async fn find_all(&self) -> Result<Vec<Movie>, DatabaseError> {
        let rows = sqlx::query_as::<_, MovieRow>("SELECT id, doc FROM movies ORDER BY seq")
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(Movie::from).collect())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Movie>, DatabaseError> {
        let row = sqlx::query_as::<_, MovieRow>("SELECT id, doc FROM movies WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(Movie::from))
    }

    async fn update_by_id(&self, id: Uuid, patch: MovieFields) -> Result<Option<Movie>, DatabaseError> {
        let patch = patch.to_patch()?;

        let row = sqlx::query_as::<_, MovieRow>(
            "UPDATE movies SET doc = doc || $2 WHERE id = $1 RETURNING id, doc",
        )
        .bind(id)
        .bind(Json(patch))
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Movie::from))
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<bool, DatabaseError> {
        let result = sqlx::query("DELETE FROM movies WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl UserStore for PgStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DatabaseError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, username, password_hash, created_at FROM users WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn insert(&self, user: NewUser) -> Result<User, DatabaseError> {
        let user = user.into_user();

        sqlx::query_as::<_, User>(
            "INSERT INTO users (id, username, password_hash, created_at) VALUES ($1, $2, $3, $4)
             RETURNING id, username, password_hash, created_at",
        )
        .bind(user.id)
        .bind(&user.username)
        .bind(&user.password_hash)
        .bind(user.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|err| match err {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                DatabaseError::Conflict(format!("username '{}' already exists", user.username))
            }
            other => DatabaseError::Sqlx(other),
        })
    }
}
