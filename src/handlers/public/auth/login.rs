// handlers/public/auth/login.rs - POST /user_login handler

use axum::{extract::State, response::Json};
use serde_json::{json, Value};
use tracing::info;

use crate::app::AppState;
use crate::error::ApiError;

use super::CredentialsRequest;

/// POST /user_login - Authenticate user and receive JWT token
///
/// Expected Input:
/// ```json
/// { "username": "string", "password": "string" }
/// ```
///
/// Expected Output (Success):
/// ```json
/// { "token": "eyJhbGciOiJIUzI1NiI..." }
/// ```
///
/// Unknown users and wrong passwords get the same 401 body.
pub async fn login_post(
    State(state): State<AppState>,
    Json(payload): Json<CredentialsRequest>,
) -> Result<Json<Value>, ApiError> {
    let token = state
        .credentials
        .login(&payload.username, &payload.password)
        .await
        .inspect_err(|e| info!(username = %payload.username, "Login failed: {}", e))?;

    Ok(Json(json!({ "token": token })))
}
