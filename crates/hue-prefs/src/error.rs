//! Error types for preference boundary operations.
//!
//! # Design
//! - In-memory reads and writes are total; errors only arise when raw input
//!   (environment, storage, user text) is parsed into typed preferences.
//! - Keep error messages constant while carrying context fields for debugging.

use thiserror::Error;

/// Convenience alias for preference results.
pub type PreferenceResult<T> = Result<T, PreferenceError>;

/// Primary error type for preference parsing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PreferenceError {
    /// Raw input did not name a value in the preference's domain.
    #[error("invalid preference value")]
    InvalidPreferenceValue {
        /// Preference the value was destined for.
        field: &'static str,
        /// Offending raw value.
        value: String,
    },
}

impl PreferenceError {
    pub(crate) fn invalid(field: &'static str, value: &str) -> Self {
        Self::InvalidPreferenceValue {
            field,
            value: value.to_string(),
        }
    }

    /// Preference name associated with the failure.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::InvalidPreferenceValue { field, .. } => field,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_value_exposes_context() {
        let err = PreferenceError::invalid("color_scheme", "sepia");
        assert_eq!(err.field(), "color_scheme");
        assert_eq!(err.to_string(), "invalid preference value");
        assert!(matches!(
            err,
            PreferenceError::InvalidPreferenceValue { ref value, .. } if value == "sepia"
        ));
    }
}
