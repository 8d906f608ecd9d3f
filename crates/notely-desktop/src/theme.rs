//! Theme configuration for the desktop app

use serde::{Deserialize, Serialize};

/// Active theme, toggled from the header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    #[must_use]
    pub const fn is_dark(self) -> bool {
        matches!(self, Self::Dark)
    }

    /// Label for the toggle button: the theme it switches to.
    #[must_use]
    pub const fn toggle_label(self) -> &'static str {
        match self {
            Self::Light => "Dark mode",
            Self::Dark => "Light mode",
        }
    }

    #[must_use]
    pub const fn palette(self) -> &'static ColorPalette {
        match self {
            Self::Light => &LIGHT_PALETTE,
            Self::Dark => &DARK_PALETTE,
        }
    }
}

/// Color palette for the application
#[derive(Debug, Clone, Copy)]
pub struct ColorPalette {
    pub bg_primary: &'static str,
    pub bg_secondary: &'static str,
    pub bg_tertiary: &'static str,
    pub text_primary: &'static str,
    pub text_secondary: &'static str,
    pub text_muted: &'static str,
    pub border: &'static str,
    pub border_light: &'static str,
    pub accent: &'static str,
    pub accent_text: &'static str,
    pub error: &'static str,
    pub error_bg: &'static str,
    pub success: &'static str,
}

pub const LIGHT_PALETTE: ColorPalette = ColorPalette {
    bg_primary: "#ffffff",
    bg_secondary: "#f7f7f5",
    bg_tertiary: "#efefec",
    text_primary: "#1f2328",
    text_secondary: "#57606a",
    text_muted: "#8c959f",
    border: "#d0d7de",
    border_light: "#eaeef2",
    accent: "#0f766e",
    accent_text: "#ffffff",
    error: "#b42318",
    error_bg: "#fef3f2",
    success: "#15803d",
};

pub const DARK_PALETTE: ColorPalette = ColorPalette {
    bg_primary: "#161b22",
    bg_secondary: "#1f252d",
    bg_tertiary: "#2a313b",
    text_primary: "#e6edf3",
    text_secondary: "#9da7b3",
    text_muted: "#6e7781",
    border: "#30363d",
    border_light: "#3d444d",
    accent: "#2dd4bf",
    accent_text: "#0b1f1d",
    error: "#fca5a5",
    error_bg: "#3b1219",
    success: "#4ade80",
};
