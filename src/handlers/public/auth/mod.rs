// handlers/public/auth/mod.rs - Public authentication handlers
//
// Token acquisition endpoints that do not require authentication.

use serde::Deserialize;

pub mod login;    // POST /user_login - authenticate and get JWT
pub mod register; // POST /user_register - create new account

pub use login::login_post;
pub use register::register_post;

/// Body shared by login and registration.
///
/// Missing keys deserialize as empty so the service answers them with a JSON 400.
#[derive(Debug, Deserialize)]
pub struct CredentialsRequest {
    #[serde(alias = "identifier", default)]
    pub username: String,
    #[serde(alias = "secret", default)]
    pub password: String,
}
