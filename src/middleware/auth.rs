use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::Next,
    response::Response,
};
use tracing::debug;
use uuid::Uuid;

use crate::app::AppState;
use crate::auth::Claims;
use crate::error::ApiError;

/// Authenticated user context extracted from JWT
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub username: String,
    pub user_id: Uuid,
}

impl From<Claims> for AuthUser {
    fn from(claims: Claims) -> Self {
        Self {
            username: claims.sub,
            user_id: claims.user_id,
        }
    }
}

/// JWT authentication middleware that validates tokens and extracts user context.
///
/// Every rejection is the same generic 401; the reason only goes to the log.
pub async fn jwt_auth_middleware(
    State(state): State<AppState>,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let path = request.uri().path().to_string();
    let unauthorized = |reason: String| {
        debug!(path = %path, "Rejected request: {}", reason);
        ApiError::unauthorized("Unauthorized")
    };

    let claims = match extract_bearer_token(&headers) {
        Ok(token) => state.tokens.verify(token).map_err(|e| unauthorized(e.to_string()))?,
        Err(reason) => return Err(unauthorized(reason.to_string())),
    };

    request.extensions_mut().insert(AuthUser::from(claims));
    Ok(next.run(request).await)
}

/// Extract the token from `Authorization: Bearer <token>`
fn extract_bearer_token(headers: &HeaderMap) -> Result<&str, &'static str> {
    let auth_str = headers
        .get(AUTHORIZATION)
        .ok_or("Missing Authorization header")?
        .to_str()
        .map_err(|_| "Invalid Authorization header format")?;

    let token = auth_str
        .strip_prefix("Bearer ")
        .ok_or("Authorization header must use Bearer token format")?
        .trim();

    if token.is_empty() {
        return Err("Empty JWT token");
    }
    Ok(token)
}
