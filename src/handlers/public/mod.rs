// handlers/public/mod.rs - Public handlers (no authentication required)
//
// Endpoints used to obtain a token. No middleware layers.

pub mod auth;
