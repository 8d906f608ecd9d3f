//! Client configuration for the Supabase backend.
//!
//! Values are public endpoints and the anon key; secrets never live here.
//! The desktop app resolves them from the environment after loading `.env`.

use std::env;

use crate::util::{is_http_url, normalize_text_option};
use crate::{Error, Result};

const ENV_SUPABASE_URL: &str = "SUPABASE_URL";
const ENV_SUPABASE_ANON_KEY: &str = "SUPABASE_ANON_KEY";
const ENV_NOTES_TABLE: &str = "NOTELY_NOTES_TABLE";

/// Table used when `NOTELY_NOTES_TABLE` is not set.
pub const DEFAULT_NOTES_TABLE: &str = "notes";

/// Resolved Supabase project settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Project base URL without trailing slash, e.g. `https://abc.supabase.co`
    pub supabase_url: String,
    /// Public anon key sent as `apikey`
    pub supabase_anon_key: String,
    /// PostgREST table holding notes
    pub notes_table: String,
}

impl ClientConfig {
    pub fn new(url: impl AsRef<str>, anon_key: impl AsRef<str>) -> Result<Self> {
        let supabase_url = normalize_base_url(url.as_ref())?;
        let supabase_anon_key = anon_key.as_ref().trim().to_string();
        if supabase_anon_key.is_empty() {
            return Err(Error::InvalidInput(
                "Supabase anon key must not be empty".to_string(),
            ));
        }
        Ok(Self {
            supabase_url,
            supabase_anon_key,
            notes_table: DEFAULT_NOTES_TABLE.to_string(),
        })
    }

    /// Load configuration from environment variables.
    ///
    /// Returns `Ok(None)` when neither Supabase variable is set and an error
    /// when only one of them is.
    pub fn from_env() -> Result<Option<Self>> {
        parse_config(|key| env::var(key).ok())
    }

    #[must_use]
    pub fn with_notes_table(mut self, table: impl Into<String>) -> Self {
        self.notes_table = table.into();
        self
    }

    /// GoTrue endpoint, e.g. `https://abc.supabase.co/auth/v1`.
    #[must_use]
    pub fn auth_url(&self) -> String {
        format!("{}/auth/v1", self.supabase_url)
    }

    /// PostgREST endpoint for the notes table.
    #[must_use]
    pub fn notes_url(&self) -> String {
        format!("{}/rest/v1/{}", self.supabase_url, self.notes_table)
    }
}

fn parse_config(lookup: impl Fn(&str) -> Option<String>) -> Result<Option<ClientConfig>> {
    let url = normalize_text_option(lookup(ENV_SUPABASE_URL));
    let anon_key = normalize_text_option(lookup(ENV_SUPABASE_ANON_KEY));
    let table = normalize_text_option(lookup(ENV_NOTES_TABLE));

    match (url, anon_key) {
        (None, None) => Ok(None),
        (Some(url), Some(anon_key)) => {
            let config = ClientConfig::new(url, anon_key)?;
            Ok(Some(match table {
                Some(table) => config.with_notes_table(table),
                None => config,
            }))
        }
        (Some(_), None) => Err(Error::InvalidInput(format!(
            "{ENV_SUPABASE_URL} is set but {ENV_SUPABASE_ANON_KEY} is missing"
        ))),
        (None, Some(_)) => Err(Error::InvalidInput(format!(
            "{ENV_SUPABASE_ANON_KEY} is set but {ENV_SUPABASE_URL} is missing"
        ))),
    }
}

fn normalize_base_url(raw: &str) -> Result<String> {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return Err(Error::InvalidInput(
            "Supabase URL must not be empty".to_string(),
        ));
    }
    if !is_http_url(trimmed) {
        return Err(Error::InvalidInput(
            "Supabase URL must include http:// or https://".to_string(),
        ));
    }
    let base = trimmed
        .strip_suffix("/auth/v1")
        .or_else(|| trimmed.strip_suffix("/rest/v1"))
        .unwrap_or(trimmed);
    Ok(base.to_string())
}
