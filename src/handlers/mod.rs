// handlers/mod.rs - Handlers split by security tier
//
// Public (no auth) → Protected (JWT auth)

pub mod protected;
pub mod public;
