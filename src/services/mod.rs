pub mod credentials;

pub use credentials::{AuthError, CredentialService};
