pub mod password;

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::database::models::User;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Username the token was issued to
    pub sub: String,
    pub user_id: Uuid,
    pub exp: i64,
    pub iat: i64,
}

#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("JWT generation error: {0}")]
    Generation(String),

    #[error("Invalid JWT token: {0}")]
    Invalid(String),

    #[error("Invalid JWT secret")]
    InvalidSecret,

    #[error("Invalid token lifetime: {0} hours")]
    InvalidLifetime(u64),
}

/// Issues and verifies bearer credentials.
///
/// Route wiring only sees this trait, so the signing scheme can change
/// without touching the router or the auth middleware.
pub trait TokenIssuer: Send + Sync {
    fn issue(&self, user: &User) -> Result<String, TokenError>;

    fn verify(&self, token: &str) -> Result<Claims, TokenError>;
}

/// HS256 JWTs signed with a shared secret
pub struct JwtTokens {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl: Duration,
}

impl JwtTokens {
    pub fn new(secret: &str, ttl: Duration) -> Result<Self, TokenError> {
        if secret.is_empty() {
            return Err(TokenError::InvalidSecret);
        }

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            ttl,
        })
    }

    pub fn from_hours(secret: &str, expiry_hours: u64) -> Result<Self, TokenError> {
        let ttl = i64::try_from(expiry_hours)
            .ok()
            .and_then(Duration::try_hours)
            .ok_or(TokenError::InvalidLifetime(expiry_hours))?;
        Self::new(secret, ttl)
    }
}

impl TokenIssuer for JwtTokens {
    fn issue(&self, user: &User) -> Result<String, TokenError> {
        let now = Utc::now();
        let exp = now
            .checked_add_signed(self.ttl)
            .ok_or_else(|| TokenError::Generation("token expiry out of range".to_string()))?;
        let claims = Claims {
            sub: user.username.clone(),
            user_id: user.id,
            exp: exp.timestamp(),
            iat: now.timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| TokenError::Generation(e.to_string()))
    }

    fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        decode::<Claims>(token, &self.decoding_key, &Validation::default())
            .map(|data| data.claims)
            .map_err(|e| TokenError::Invalid(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::models::NewUser;

    fn user() -> User {
        NewUser { username: "ripley".into(), password_hash: String::new() }.into_user()
    }

    #[test]
    fn issued_token_verifies() {
        let tokens = JwtTokens::from_hours("secret", 1).unwrap();
        let user = user();

        let claims = tokens.verify(&tokens.issue(&user).unwrap()).unwrap();
        assert_eq!(claims.sub, "ripley");
        assert_eq!(claims.user_id, user.id);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn expired_token_is_rejected() {
        // Past the validator's default 60s leeway
        let tokens = JwtTokens::new("secret", Duration::hours(-2)).unwrap();
        let token = tokens.issue(&user()).unwrap();

        assert!(matches!(tokens.verify(&token), Err(TokenError::Invalid(_))));
    }

    #[test]
    fn foreign_signature_is_rejected() {
        let ours = JwtTokens::from_hours("secret", 1).unwrap();
        let theirs = JwtTokens::from_hours("other-secret", 1).unwrap();
        let token = theirs.issue(&user()).unwrap();

        assert!(ours.verify(&token).is_err());
        assert!(ours.verify("not.a.jwt").is_err());
    }

    #[test]
    fn oversized_lifetime_is_refused() {
        assert!(matches!(
            JwtTokens::from_hours("secret", u64::MAX),
            Err(TokenError::InvalidLifetime(u64::MAX))
        ));
    }

    #[test]
    fn lifetime_past_calendar_range_fails_issue_without_panicking() {
        let tokens = JwtTokens::new("secret", Duration::days(365 * 300_000)).unwrap();
        assert!(matches!(tokens.issue(&user()), Err(TokenError::Generation(_))));
    }

    #[test]
    fn empty_secret_is_refused() {
        assert!(matches!(JwtTokens::from_hours("", 1), Err(TokenError::InvalidSecret)));
    }
}
