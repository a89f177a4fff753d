pub mod error;
pub mod model;
pub mod service;

pub use error::AuthServiceError;
pub use model::{AccountStatus, Credential, Identity, User};
pub use service::{AuthService, AuthServiceApi};

/// Source of the active user identity.
///
/// Consumers call this at the moment they need an identity instead of caching
/// it, so a login or logout is visible to the very next operation.
pub trait IdentityProvider: Send + Sync {
    fn current_identity(&self) -> Option<Identity>;
}

/// Repository trait for looking up known accounts
pub trait CredentialsRepository: Send + Sync {
    fn find_by_username(&self, username: &str) -> Option<Credential>;
}
