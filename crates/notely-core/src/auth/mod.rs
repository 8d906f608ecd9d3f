//! Supabase authentication: session types, persistence seam, and client.

mod client;
mod live;

use std::fmt;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use client::SupabaseAuthClient;
pub use live::{LiveSession, SessionRefresher};

/// Refresh this many seconds before the token actually expires.
const EXPIRY_SKEW_SECONDS: i64 = 60;

/// The signed-in user; `id` is the owner key of every note row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: String,
    pub email: Option<String>,
}

impl AuthUser {
    /// Email when known, otherwise the user id.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.email.as_deref().unwrap_or(&self.id)
    }
}

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    pub refresh_token: String,
    /// Unix seconds
    pub expires_at: i64,
    pub user: AuthUser,
}

impl Session {
    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.expires_at <= Utc::now().timestamp() + EXPIRY_SKEW_SECONDS
    }

    #[must_use]
    pub fn owner_id(&self) -> &str {
        &self.user.id
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Session")
            .field("access_token", &"[REDACTED]")
            .field("refresh_token", &"[REDACTED]")
            .field("expires_at", &self.expires_at)
            .field("user", &self.user)
            .finish()
    }
}

/// What the UI knows about authentication right now.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AuthState {
    /// Session restore has not finished yet
    #[default]
    Loading,
    SignedOut,
    SignedIn(Session),
}

impl AuthState {
    #[must_use]
    pub const fn session(&self) -> Option<&Session> {
        match self {
            Self::SignedIn(session) => Some(session),
            Self::Loading | Self::SignedOut => None,
        }
    }
}

impl From<Option<Session>> for AuthState {
    fn from(value: Option<Session>) -> Self {
        value.map_or(Self::SignedOut, Self::SignedIn)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignUpOutcome {
    SignedIn(Session),
    /// The project requires email confirmation before the first sign-in
    ConfirmationRequired,
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid auth configuration: {0}")]
    InvalidConfiguration(&'static str),
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Failed to parse JSON payload: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Auth API error: {0}")]
    Api(String),
    #[error("Secure storage error: {0}")]
    SecureStorage(String),
}

pub type AuthResult<T> = Result<T, AuthError>;

/// Where a session survives between launches.
pub trait SessionPersistence: Clone + Send + Sync + 'static {
    fn load(&self) -> AuthResult<Option<Session>>;
    fn save(&self, session: &Session) -> AuthResult<()>;
    fn clear(&self) -> AuthResult<()>;
}

/// Keeps nothing; every launch starts signed out.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPersistence;

impl SessionPersistence for NoPersistence {
    fn load(&self) -> AuthResult<Option<Session>> {
        Ok(None)
    }

    fn save(&self, _session: &Session) -> AuthResult<()> {
        Ok(())
    }

    fn clear(&self) -> AuthResult<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(expires_at: i64) -> Session {
        Session {
            access_token: "secret-access-token".to_string(),
            refresh_token: "secret-refresh-token".to_string(),
            expires_at,
            user: AuthUser {
                id: "user-1".to_string(),
                email: None,
            },
        }
    }

    #[test]
    fn session_debug_redacts_tokens() {
        let rendered = format!("{:?}", session(1_700_000_000));
        assert!(!rendered.contains("secret-access-token"));
        assert!(!rendered.contains("secret-refresh-token"));
        assert!(rendered.contains("[REDACTED]"));
    }

    #[test]
    fn expiry_includes_skew() {
        let now = Utc::now().timestamp();
        assert!(session(now + 30).is_expired());
        assert!(!session(now + 3_600).is_expired());
    }

    #[test]
    fn auth_state_from_optional_session() {
        assert_eq!(AuthState::from(None), AuthState::SignedOut);
        let state = AuthState::from(Some(session(0)));
        assert_eq!(state.session().map(Session::owner_id), Some("user-1"));
        assert_eq!(AuthState::default(), AuthState::Loading);
    }

    #[test]
    fn display_name_prefers_email() {
        let mut user = session(0).user;
        assert_eq!(user.display_name(), "user-1");
        user.email = Some("me@example.com".to_string());
        assert_eq!(user.display_name(), "me@example.com");
    }
}
