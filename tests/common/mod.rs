#![allow(dead_code)]

use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::Duration;
use reqwest::StatusCode;
use serde_json::{json, Value};
use uuid::Uuid;

use favourite_movies_api::auth::{JwtTokens, TokenIssuer};
use favourite_movies_api::config::{AppConfig, StoreBackend};
use favourite_movies_api::database::models::{Movie, MovieFields, NewUser};
use favourite_movies_api::database::{DatabaseError, MemoryStore, MovieStore};
use favourite_movies_api::{app, AppState};

pub const TEST_SECRET: &str = "integration-test-secret";

pub struct TestServer {
    pub port: u16,
    pub base_url: String,
    pub client: reqwest::Client,
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Register `username` and return a bearer token for it
    pub async fn login_as(&self, username: &str) -> Result<String> {
        let creds = json!({ "username": username, "password": "correct horse" });

        let res = self.client.post(self.url("/user_register")).json(&creds).send().await?;
        anyhow::ensure!(res.status() == StatusCode::CREATED, "register failed: {}", res.status());

        let res = self.client.post(self.url("/user_login")).json(&creds).send().await?;
        anyhow::ensure!(res.status() == StatusCode::OK, "login failed: {}", res.status());

        let body: Value = res.json().await?;
        body["token"]
            .as_str()
            .map(str::to_string)
            .context("login response has no token")
    }
}

fn test_config(port: u16) -> AppConfig {
    let mut config = AppConfig::development();
    config.database.backend = StoreBackend::Memory;
    config.security.jwt_secret = TEST_SECRET.to_string();
    config.api.port = port;
    config
}

/// Start the API in-process on a free port with a fresh in-memory store.
///
/// Each `#[tokio::test]` owns its runtime, so each test gets its own server.
pub async fn spawn_server() -> Result<TestServer> {
    let port = portpicker::pick_unused_port().context("failed to pick free port")?;
    let config = test_config(port);
    let state = AppState::from_config(&config).await?;
    serve(state, &config).await
}

/// Like `spawn_server`, but movies go to `movies`; users stay in memory
pub async fn spawn_server_with_movies(movies: Arc<dyn MovieStore>) -> Result<TestServer> {
    let port = portpicker::pick_unused_port().context("failed to pick free port")?;
    let config = test_config(port);
    let tokens = Arc::new(JwtTokens::from_hours(TEST_SECRET, 1)?);
    let state = AppState::new(movies, Arc::new(MemoryStore::new()), tokens);
    serve(state, &config).await
}

async fn serve(state: AppState, config: &AppConfig) -> Result<TestServer> {
    let port = config.api.port;
    let base_url = format!("http://127.0.0.1:{}", port);
    let router = app(state, config);

    let listener = tokio::net::TcpListener::bind(("127.0.0.1", port))
        .await
        .with_context(|| format!("failed to bind {}", base_url))?;
    tokio::spawn(async move {
        axum::serve(listener, router).await.ok();
    });

    Ok(TestServer { port, base_url, client: reqwest::Client::new() })
}

/// Movie store whose backend is always down
pub struct UnavailableMovieStore;

fn unavailable() -> DatabaseError {
    DatabaseError::Sqlx(sqlx::Error::PoolTimedOut)
}

#[async_trait]
impl MovieStore for UnavailableMovieStore {
    async fn create(&self, _fields: MovieFields) -> Result<Movie, DatabaseError> {
        Err(unavailable())
    }

    async fn find_all(&self) -> Result<Vec<Movie>, DatabaseError> {
        Err(unavailable())
    }

    async fn find_by_id(&self, _id: Uuid) -> Result<Option<Movie>, DatabaseError> {
        Err(unavailable())
    }

    async fn update_by_id(&self, _id: Uuid, _patch: MovieFields) -> Result<Option<Movie>, DatabaseError> {
        Err(unavailable())
    }

    async fn delete_by_id(&self, _id: Uuid) -> Result<bool, DatabaseError> {
        Err(unavailable())
    }
}

/// A correctly signed token whose expiry is already in the past
pub fn expired_token() -> Result<String> {
    let tokens = JwtTokens::new(TEST_SECRET, Duration::hours(-2))?;
    let user = NewUser { username: "ghost".into(), password_hash: String::new() }.into_user();
    Ok(tokens.issue(&user)?)
}

/// A live token signed with a key the server doesn't know
pub fn foreign_token() -> Result<String> {
    let tokens = JwtTokens::from_hours("someone-elses-secret", 1)?;
    let user = NewUser { username: "mallory".into(), password_hash: String::new() }.into_user();
    Ok(tokens.issue(&user)?)
}
