// handlers/protected/mod.rs - Protected handlers (JWT authentication required)
//
// Routes here are wrapped by `middleware::jwt_auth_middleware`.

pub mod movies;
