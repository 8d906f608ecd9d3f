//! Services backing the desktop UI.

mod auth;
mod preferences;
mod session_store;

pub use auth::{AuthService, SessionClient};
pub use preferences::Preferences;
