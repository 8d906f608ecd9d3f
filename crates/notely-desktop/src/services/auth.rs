//! Supabase authentication service with keyring-backed sessions.

use notely_core::auth::{AuthResult, LiveSession, Session, SignUpOutcome, SupabaseAuthClient};
use notely_core::config::ClientConfig;

use super::session_store::KeyringSessionStore;

pub type SessionClient = SupabaseAuthClient<KeyringSessionStore>;

#[derive(Clone)]
pub struct AuthService {
    inner: SessionClient,
}

impl AuthService {
    pub fn new(config: &ClientConfig) -> AuthResult<Self> {
        Ok(Self {
            inner: SupabaseAuthClient::new(config, KeyringSessionStore::for_project(config))?,
        })
    }

    pub async fn restore_session(&self) -> AuthResult<Option<Session>> {
        self.inner.restore_session().await
    }

    pub async fn sign_in(&self, email: &str, password: &str) -> AuthResult<Session> {
        self.inner.sign_in(email, password).await
    }

    pub async fn sign_up(&self, email: &str, password: &str) -> AuthResult<SignUpOutcome> {
        self.inner.sign_up(email, password).await
    }

    pub async fn sign_out(&self, session: &Session) -> AuthResult<()> {
        self.inner.sign_out(session).await
    }

    /// Hand `session` to a long-lived client that refreshes it as it expires.
    /// Refreshed sessions are written back to the keyring.
    #[must_use]
    pub fn live_session(&self, session: Session) -> LiveSession<SessionClient> {
        LiveSession::new(self.inner.clone(), session)
    }
}
