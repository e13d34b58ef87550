use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    http::HeaderValue,
    middleware,
    routing::{delete, get, post, put},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;

use crate::auth::{JwtTokens, TokenIssuer};
use crate::config::{AppConfig, Environment, StoreBackend};
use crate::database::{DatabaseManager, MemoryStore, MovieStore, PgStore, UserStore};
use crate::handlers::{protected::movies, public::auth};
use crate::middleware::jwt_auth_middleware;
use crate::services::CredentialService;

/// Shared, immutable handles injected into every handler
#[derive(Clone)]
pub struct AppState {
    pub movies: Arc<dyn MovieStore>,
    pub credentials: Arc<CredentialService>,
    pub tokens: Arc<dyn TokenIssuer>,
}

impl AppState {
    pub fn new(
        movies: Arc<dyn MovieStore>,
        users: Arc<dyn UserStore>,
        tokens: Arc<dyn TokenIssuer>,
    ) -> Self {
        Self {
            movies,
            credentials: Arc::new(CredentialService::new(users, tokens.clone())),
            tokens,
        }
    }

    /// Connects the configured backend and builds the token issuer
    pub async fn from_config(config: &AppConfig) -> anyhow::Result<Self> {
        let tokens: Arc<dyn TokenIssuer> = Arc::new(JwtTokens::from_hours(
            &config.security.jwt_secret,
            config.security.jwt_expiry_hours,
        )?);

        let state = match config.database.backend {
            StoreBackend::Postgres => {
                let pool = DatabaseManager::connect(&config.database).await?;
                DatabaseManager::health_check(&pool).await?;
                let store = Arc::new(PgStore::new(pool));
                Self::new(store.clone(), store, tokens)
            }
            StoreBackend::Memory => {
                let store = Arc::new(MemoryStore::new());
                Self::new(store.clone(), store, tokens)
            }
        };

        info!(backend = ?config.database.backend, "Store ready");
        Ok(state)
    }
}

pub fn app(state: AppState, config: &AppConfig) -> Router {
    Router::new()
        .merge(auth_public_routes())
        .merge(movie_routes(state.clone()))
        // Global middleware
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors_layer(config))
                .layer(DefaultBodyLimit::max(config.api.max_request_size_bytes)),
        )
        .with_state(state)
}

fn auth_public_routes() -> Router<AppState> {
    Router::new()
        .route("/user_login", post(auth::login_post))
        .route("/user_register", post(auth::register_post))
}

fn movie_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/get_movies", get(movies::movie_list))
        .route("/get_movie/:id", get(movies::movie_show))
        .route("/add_movie", post(movies::movie_create))
        .route("/update_movie/:id", put(movies::movie_update))
        .route("/delete_movie/:id", delete(movies::movie_delete))
        // route_layer: unmatched paths fall through to the plain 404
        .route_layer(middleware::from_fn_with_state(state, jwt_auth_middleware))
}

fn cors_layer(config: &AppConfig) -> CorsLayer {
    let security = &config.security;
    if !security.enable_cors {
        return CorsLayer::new();
    }
    if config.environment == Environment::Development {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = security
        .cors_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any)
}
