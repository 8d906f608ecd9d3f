//! Keeps the signed-in Notely session in the OS keyring so the app reopens
//! signed in, and so refreshed tokens survive a restart.

use keyring::Entry;
use notely_core::auth::{AuthError, AuthResult, Session, SessionPersistence};
use notely_core::config::ClientConfig;

const KEYRING_SERVICE_NAME: &str = "notely";

/// One keyring secret per Supabase project.
///
/// The account name carries the project URL, so pointing the app at a
/// different project never restores a session issued by another one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyringSessionStore {
    service_name: String,
    account: String,
}

impl KeyringSessionStore {
    #[must_use]
    pub fn for_project(config: &ClientConfig) -> Self {
        Self {
            service_name: KEYRING_SERVICE_NAME.to_string(),
            account: format!("session:{}", config.supabase_url),
        }
    }

    fn entry(&self) -> AuthResult<Entry> {
        Entry::new(&self.service_name, &self.account)
            .map_err(|error| AuthError::SecureStorage(error.to_string()))
    }
}

impl SessionPersistence for KeyringSessionStore {
    fn load(&self) -> AuthResult<Option<Session>> {
        let raw = match self.entry()?.get_password() {
            Ok(raw) => raw,
            Err(keyring::Error::NoEntry) => return Ok(None),
            Err(error) => return Err(AuthError::SecureStorage(error.to_string())),
        };
        match serde_json::from_str(&raw) {
            Ok(session) => Ok(Some(session)),
            Err(error) => {
                // Written by an older build; sign in again rather than fail startup.
                tracing::warn!("Ignoring unreadable stored session: {}", error);
                Ok(None)
            }
        }
    }

    fn save(&self, session: &Session) -> AuthResult<()> {
        let serialized = serde_json::to_string(session)?;
        self.entry()?
            .set_password(&serialized)
            .map_err(|error| AuthError::SecureStorage(error.to_string()))?;
        tracing::debug!("Stored session for {}", session.user.display_name());
        Ok(())
    }

    fn clear(&self) -> AuthResult<()> {
        match self.entry()?.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(error) => Err(AuthError::SecureStorage(error.to_string())),
        }
    }
}
