//! Persisted UI preferences (`preferences.json` under the config dir).

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::theme::Theme;

const APP_DIR_NAME: &str = "notely";
const PREFERENCES_FILE_NAME: &str = "preferences.json";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    #[serde(default)]
    pub theme: Theme,
}

#[derive(Debug, Error)]
pub enum PreferencesError {
    #[error("No platform config directory")]
    NoConfigDir,
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

#[must_use]
pub fn default_preferences_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR_NAME).join(PREFERENCES_FILE_NAME))
}

impl Preferences {
    /// Load from the default location. Missing or unreadable files yield
    /// defaults.
    #[must_use]
    pub fn load_or_default() -> Self {
        let Some(path) = default_preferences_path() else {
            return Self::default();
        };
        match Self::load_from_path(&path) {
            Ok(preferences) => preferences,
            Err(error) => {
                tracing::warn!(
                    "Failed to read preferences at {}: {}. Using defaults.",
                    path.display(),
                    error
                );
                Self::default()
            }
        }
    }

    pub fn load_from_path(path: &Path) -> Result<Self, PreferencesError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    pub fn save(&self) -> Result<PathBuf, PreferencesError> {
        let path = default_preferences_path().ok_or(PreferencesError::NoConfigDir)?;
        self.save_to_path(&path)?;
        Ok(path)
    }

    pub fn save_to_path(&self, path: &Path) -> Result<(), PreferencesError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn scratch_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("notely-prefs-{}-{name}", std::process::id()))
            .join(PREFERENCES_FILE_NAME)
    }

    #[test]
    fn missing_file_yields_defaults() {
        let path = scratch_path("missing");
        assert_eq!(Preferences::load_from_path(&path).unwrap(), Preferences::default());
    }

    #[test]
    fn saved_theme_is_read_back() {
        let path = scratch_path("saved");
        let preferences = Preferences { theme: Theme::Dark };
        preferences.save_to_path(&path).unwrap();

        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(raw.contains("\"theme\": \"dark\""));
        assert_eq!(Preferences::load_from_path(&path).unwrap(), preferences);

        std::fs::remove_dir_all(path.parent().unwrap()).ok();
    }

    #[test]
    fn garbage_is_an_error() {
        let path = scratch_path("garbage");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "not json").unwrap();

        assert!(matches!(
            Preferences::load_from_path(&path),
            Err(PreferencesError::Json(_))
        ));

        std::fs::remove_dir_all(path.parent().unwrap()).ok();
    }
}
