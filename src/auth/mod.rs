pub mod gate;

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::watch;

use crate::models::UserSession;

pub use gate::SessionGate;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("authentication failed: {0}")]
    Failed(String),
}

/// The identity provider boundary. Concrete providers (OAuth popups
/// included) live outside this crate; the core consumes only the entry
/// points below and the "current identity or none" stream.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn sign_in(&self, email: &str, password: &str) -> Result<UserSession, AuthError>;

    async fn sign_up(&self, email: &str, password: &str) -> Result<UserSession, AuthError>;

    async fn sign_out(&self) -> Result<(), AuthError>;

    /// Session-changed stream. Holds the current identity; flips to `None`
    /// on sign-out.
    fn sessions(&self) -> watch::Receiver<Option<UserSession>>;
}
