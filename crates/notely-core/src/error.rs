//! Error types for notely-core

use thiserror::Error;

/// Result type alias using notely-core's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in notely-core operations
#[derive(Error, Debug)]
pub enum Error {
    /// The remote store answered with an error status
    #[error("Remote store error: {0}")]
    Remote(String),

    /// Transport-level HTTP failure
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Response or payload could not be (de)serialized
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// The session could not be refreshed for a store request
    #[error("Authentication failed: {0}")]
    Auth(#[from] crate::auth::AuthError),

    /// Note not found
    #[error("Note not found: {0}")]
    NotFound(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// An identical operation is still waiting on the remote store
    #[error("Operation already in progress: {0}")]
    Busy(String),
}

impl Error {
    /// Whether this error came from an in-flight guard rather than the store.
    #[must_use]
    pub const fn is_busy(&self) -> bool {
        matches!(self, Self::Busy(_))
    }
}
