use super::error::AuthServiceError;
use super::{AccountStatus, CredentialsRepository, Identity, IdentityProvider, User};
use crate::infrastructure::repositories::SessionRepository;
use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use tokio::sync::watch;

pub struct AuthService {
    credentials_repo: Arc<dyn CredentialsRepository>,
    session_repo: Arc<SessionRepository>,
    identity_tx: watch::Sender<Option<Identity>>,
}

impl AuthService {
    pub fn new(
        credentials_repo: Arc<dyn CredentialsRepository>,
        session_repo: Arc<SessionRepository>,
    ) -> Self {
        let (identity_tx, _) = watch::channel(None);
        Self {
            credentials_repo,
            session_repo,
            identity_tx,
        }
    }

    /// Receiver that observes every identity change (login, logout, restore)
    pub fn subscribe(&self) -> watch::Receiver<Option<Identity>> {
        self.identity_tx.subscribe()
    }

    pub fn is_authenticated(&self) -> bool {
        self.identity_tx.borrow().is_some()
    }

    fn publish(&self, identity: Option<Identity>) {
        self.identity_tx.send_if_modified(|current| {
            if *current == identity {
                return false;
            }
            *current = identity;
            true
        });
    }
}

#[async_trait]
pub trait AuthServiceApi: Send + Sync {
    /// Validate credentials, persist the session and publish the new identity
    async fn login(&self, username: &str, password: &str) -> Result<User, AuthServiceError>;

    /// Forget the persisted session and publish the anonymous identity
    async fn logout(&self) -> Result<(), AuthServiceError>;

    /// Restore a persisted session, if any
    async fn check_auth(&self) -> Option<User>;
}

#[async_trait]
impl AuthServiceApi for AuthService {
    async fn login(&self, username: &str, password: &str) -> Result<User, AuthServiceError> {
        let credential = self
            .credentials_repo
            .find_by_username(username)
            .filter(|credential| credential.password == password)
            .ok_or_else(|| {
                tracing::info!(username = username, "Login rejected: invalid credentials");
                AuthServiceError::InvalidCredentials
            })?;

        if credential.status == AccountStatus::Blocked {
            tracing::info!(username = username, "Login rejected: account blocked");
            return Err(AuthServiceError::AccountBlocked);
        }

        let user = User {
            username: credential.username,
            logged_in_at: Utc::now(),
        };

        self.session_repo.save(&user).await?;
        self.publish(Some(user.identity()));

        tracing::info!(username = %user.username, "User logged in");
        Ok(user)
    }

    async fn logout(&self) -> Result<(), AuthServiceError> {
        // The identity goes away even if the session row cannot be removed
        self.publish(None);
        self.session_repo.clear().await?;

        tracing::info!("User logged out");
        Ok(())
    }

    async fn check_auth(&self) -> Option<User> {
        match self.session_repo.load().await {
            Ok(Some(user)) => {
                tracing::info!(username = %user.username, "Session restored");
                self.publish(Some(user.identity()));
                Some(user)
            }
            Ok(None) => None,
            Err(e) => {
                tracing::warn!(error = %e, "Discarding unreadable session");
                if let Err(e) = self.session_repo.clear().await {
                    tracing::error!(error = %e, "Failed to discard unreadable session");
                }
                None
            }
        }
    }
}

impl IdentityProvider for AuthService {
    fn current_identity(&self) -> Option<Identity> {
        self.identity_tx.borrow().clone()
    }
}
