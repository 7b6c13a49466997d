//! # Design
//!
//! - Centralize application-level errors for bootstrap.
//! - Keep error messages constant while carrying context fields for debugging.
//! - Preserve source errors without re-logging at call sites.

use thiserror::Error;

/// Result alias for application operations.
pub type AppResult<T> = Result<T, AppError>;

/// Application-level error type.
#[derive(Debug, Error)]
pub enum AppError {
    /// Preference configuration could not be loaded.
    #[error("preference operation failed")]
    Preferences {
        /// Operation identifier.
        operation: &'static str,
        /// Source preference error.
        source: hue_prefs::PreferenceError,
    },
    /// Telemetry operations failed.
    #[error("telemetry operation failed")]
    Telemetry {
        /// Operation identifier.
        operation: &'static str,
        /// Source telemetry error.
        source: hue_telemetry::TelemetryError,
    },
    /// Rendering the preference snapshot failed.
    #[error("failed to render preference snapshot")]
    Snapshot {
        /// Source serde error.
        source: serde_json::Error,
    },
}

impl AppError {
    pub(crate) const fn preferences(
        operation: &'static str,
        source: hue_prefs::PreferenceError,
    ) -> Self {
        Self::Preferences { operation, source }
    }

    pub(crate) const fn telemetry(
        operation: &'static str,
        source: hue_telemetry::TelemetryError,
    ) -> Self {
        Self::Telemetry { operation, source }
    }
}
