//! Startup state resolved once from the environment.

use notely_core::config::ClientConfig;

use crate::services::AuthService;

/// Whether the app can talk to a Supabase project.
#[derive(Clone)]
pub enum Backend {
    /// Neither `SUPABASE_URL` nor `SUPABASE_ANON_KEY` is set
    Unconfigured,
    /// Configuration is present but unusable
    Invalid(String),
    Ready {
        config: ClientConfig,
        auth: AuthService,
    },
}

impl Backend {
    pub fn from_env() -> Self {
        match ClientConfig::from_env() {
            Ok(Some(config)) => Self::from_config(config),
            Ok(None) => {
                tracing::warn!("Supabase is not configured; set SUPABASE_URL and SUPABASE_ANON_KEY");
                Self::Unconfigured
            }
            Err(error) => {
                tracing::error!("Invalid Supabase configuration: {}", error);
                Self::Invalid(error.to_string())
            }
        }
    }

    fn from_config(config: ClientConfig) -> Self {
        match AuthService::new(&config) {
            Ok(auth) => {
                tracing::info!("Using Supabase project at {}", config.supabase_url);
                Self::Ready { config, auth }
            }
            Err(error) => {
                tracing::error!("Failed to initialize auth client: {}", error);
                Self::Invalid(error.to_string())
            }
        }
    }
}

/// Transient status shown by the sign-in form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignInStatus {
    pub working: bool,
    pub error: Option<String>,
    pub notice: Option<String>,
}

impl SignInStatus {
    #[must_use]
    pub fn working() -> Self {
        Self {
            working: true,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn failed(error: impl ToString) -> Self {
        Self {
            error: Some(error.to_string()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn notice(message: impl Into<String>) -> Self {
        Self {
            notice: Some(message.into()),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_config_is_ready() {
        let config = ClientConfig::new("https://demo.supabase.co/", "anon").unwrap();
        assert!(matches!(Backend::from_config(config), Backend::Ready { .. }));
    }

    #[test]
    fn failure_clears_working_flag() {
        let status = SignInStatus::failed("Invalid login credentials");
        assert!(!status.working);
        assert_eq!(status.error.as_deref(), Some("Invalid login credentials"));
    }
}
