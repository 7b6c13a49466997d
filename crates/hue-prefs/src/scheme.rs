//! Color-scheme preference declared by the user.

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{PreferenceError, PreferenceResult};

/// Preference name used in errors and logs.
pub(crate) const COLOR_SCHEME_FIELD: &str = "color_scheme";

/// Light, dark, or follow-the-system preference.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorSchemeMode {
    /// Always render the light palette.
    Light,
    /// Always render the dark palette.
    Dark,
    /// Follow the operating system's scheme.
    #[default]
    System,
}

impl ColorSchemeMode {
    /// All supported modes, in settings-menu order.
    #[must_use]
    pub const fn all() -> [Self; 3] {
        [Self::Light, Self::Dark, Self::System]
    }

    /// Stable identifier used for display, parsing, and serialization.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
            Self::System => "system",
        }
    }

    /// Parse a raw identifier, ignoring case and surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns [`PreferenceError::InvalidPreferenceValue`] when `raw` does not
    /// name a mode.
    pub fn parse(raw: &str) -> PreferenceResult<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            "system" => Ok(Self::System),
            _ => Err(PreferenceError::invalid(COLOR_SCHEME_FIELD, raw)),
        }
    }
}

impl Display for ColorSchemeMode {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl FromStr for ColorSchemeMode {
    type Err = PreferenceError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        Self::parse(raw)
    }
}
