//! Initial preference values sourced from the process environment.

use crate::error::PreferenceResult;
use crate::scheme::ColorSchemeMode;

/// Environment variable holding the initial color-scheme preference.
pub const COLOR_SCHEME_ENV: &str = "HUE_COLOR_SCHEME";
/// Environment variable holding the initial dark-theme flag.
pub const DARK_THEME_ENV: &str = "HUE_DARK_THEME";

/// Values a [`crate::PreferenceStore`] starts from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PreferenceConfig {
    /// Initial color-scheme preference.
    pub color_scheme: ColorSchemeMode,
    /// Initial effective dark-theme flag.
    pub dark_theme_active: bool,
}

impl PreferenceConfig {
    /// Read [`COLOR_SCHEME_ENV`] and [`DARK_THEME_ENV`].
    ///
    /// # Errors
    ///
    /// Returns an error when the color-scheme variable names no known mode.
    pub fn from_env() -> PreferenceResult<Self> {
        let color_scheme = std::env::var(COLOR_SCHEME_ENV).ok();
        let dark_theme = std::env::var(DARK_THEME_ENV).ok();
        Self::from_values(color_scheme.as_deref(), dark_theme.as_deref())
    }

    /// Build a config from raw values; `None` or blank values keep defaults.
    ///
    /// # Errors
    ///
    /// Returns an error when `color_scheme` names no known mode.
    pub fn from_values(
        color_scheme: Option<&str>,
        dark_theme: Option<&str>,
    ) -> PreferenceResult<Self> {
        let color_scheme = match color_scheme.map(str::trim) {
            Some(raw) if !raw.is_empty() => ColorSchemeMode::parse(raw)?,
            _ => ColorSchemeMode::default(),
        };
        Ok(Self {
            color_scheme,
            dark_theme_active: env_flag_value(dark_theme),
        })
    }
}

fn env_flag_value(value: Option<&str>) -> bool {
    value.is_some_and(|v| {
        matches!(
            v.trim().to_ascii_lowercase().as_str(),
            "1" | "true" | "yes" | "on"
        )
    })
}
