// handlers/public/auth/register.rs - POST /user_register handler

use axum::{extract::State, http::StatusCode, response::Json};
use serde_json::{json, Value};

use crate::app::AppState;
use crate::error::ApiError;

use super::CredentialsRequest;

/// POST /user_register - Register new user account
///
/// Expected Input:
/// ```json
/// { "username": "string", "password": "string" }
/// ```
///
/// 201 on success, 409 when the username is taken.
pub async fn register_post(
    State(state): State<AppState>,
    Json(payload): Json<CredentialsRequest>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    state
        .credentials
        .register(&payload.username, &payload.password)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "User registered successfully" })),
    ))
}
