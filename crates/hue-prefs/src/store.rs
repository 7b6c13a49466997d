//! Application-wide preference context.
//!
//! # Design
//! - Two independent cells: the declared [`ColorSchemeMode`] and the effective
//!   dark-theme flag. Nothing here derives one from the other; a collaborator
//!   that watches the scheme (and the OS) is expected to write the flag.
//! - The store is an explicit value handed to consumers instead of a global, so
//!   each test builds its own.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::PreferenceConfig;
use crate::error::PreferenceResult;
use crate::observable::{Observable, Subscription};
use crate::scheme::{COLOR_SCHEME_FIELD, ColorSchemeMode};

const DARK_THEME_FIELD: &str = "dark_theme_active";

/// Point-in-time copy of both preference values.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreferenceSnapshot {
    /// Declared color-scheme preference.
    pub color_scheme: ColorSchemeMode,
    /// Effective dark-theme flag.
    pub dark_theme_active: bool,
}

/// Holder for the color-scheme preference and the effective dark-theme flag.
///
/// Clones share the same cells.
#[derive(Clone, Debug)]
pub struct PreferenceStore {
    color_scheme: Observable<ColorSchemeMode>,
    dark_theme_active: Observable<bool>,
}

impl PreferenceStore {
    /// Store initialised to [`ColorSchemeMode::System`] and a light theme.
    #[must_use]
    pub fn new() -> Self {
        Self::from_config(&PreferenceConfig::default())
    }

    /// Store initialised from `config`.
    #[must_use]
    pub fn from_config(config: &PreferenceConfig) -> Self {
        Self {
            color_scheme: Observable::with_name(COLOR_SCHEME_FIELD, config.color_scheme),
            dark_theme_active: Observable::with_name(DARK_THEME_FIELD, config.dark_theme_active),
        }
    }

    /// Declared color-scheme preference.
    #[must_use]
    pub fn color_scheme(&self) -> ColorSchemeMode {
        self.color_scheme.get()
    }

    /// Replace the color-scheme preference, notifying subscribers on change.
    pub fn set_color_scheme(&self, mode: ColorSchemeMode) {
        if self.color_scheme.set(mode) {
            debug!(color_scheme = %mode, "color scheme changed");
        }
    }

    /// Replace the color-scheme preference with `f(current)`.
    pub fn update_color_scheme(&self, f: impl FnOnce(ColorSchemeMode) -> ColorSchemeMode) {
        self.set_color_scheme(f(self.color_scheme()));
    }

    /// Parse `raw` and apply it as the color-scheme preference.
    ///
    /// # Errors
    ///
    /// Returns [`crate::PreferenceError::InvalidPreferenceValue`] when `raw`
    /// names no mode; the current value is left untouched.
    pub fn try_set_color_scheme(&self, raw: &str) -> PreferenceResult<()> {
        let mode = ColorSchemeMode::parse(raw).inspect_err(|_| {
            warn!(value = raw, "rejected color scheme value");
        })?;
        self.set_color_scheme(mode);
        Ok(())
    }

    /// Watch the color-scheme preference; `handler` runs now and on each change.
    pub fn subscribe_color_scheme<F>(&self, handler: F) -> Subscription
    where
        F: Fn(ColorSchemeMode) + 'static,
    {
        self.color_scheme.subscribe(move |mode| handler(*mode))
    }

    /// Effective dark-theme flag.
    #[must_use]
    pub fn dark_theme_active(&self) -> bool {
        self.dark_theme_active.get()
    }

    /// Replace the dark-theme flag, notifying subscribers on change.
    pub fn set_dark_theme_active(&self, active: bool) {
        if self.dark_theme_active.set(active) {
            debug!(dark_theme_active = active, "dark theme flag changed");
        }
    }

    /// Replace the dark-theme flag with `f(current)`.
    pub fn update_dark_theme_active(&self, f: impl FnOnce(bool) -> bool) {
        self.set_dark_theme_active(f(self.dark_theme_active()));
    }

    /// Watch the dark-theme flag; `handler` runs now and on each change.
    pub fn subscribe_dark_theme_active<F>(&self, handler: F) -> Subscription
    where
        F: Fn(bool) + 'static,
    {
        self.dark_theme_active.subscribe(move |active| handler(*active))
    }

    /// Both values as they are right now.
    #[must_use]
    pub fn snapshot(&self) -> PreferenceSnapshot {
        PreferenceSnapshot {
            color_scheme: self.color_scheme(),
            dark_theme_active: self.dark_theme_active(),
        }
    }

    /// Underlying color-scheme cell.
    #[must_use]
    pub const fn color_scheme_cell(&self) -> &Observable<ColorSchemeMode> {
        &self.color_scheme
    }

    /// Underlying dark-theme cell.
    #[must_use]
    pub const fn dark_theme_cell(&self) -> &Observable<bool> {
        &self.dark_theme_active
    }
}

impl Default for PreferenceStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn fresh_store_uses_defaults() {
        let store = PreferenceStore::new();
        assert_eq!(store.color_scheme(), ColorSchemeMode::System);
        assert!(!store.dark_theme_active());
        assert_eq!(store.snapshot(), PreferenceSnapshot::default());
    }

    #[test]
    fn set_then_get_round_trips() {
        let store = PreferenceStore::new();
        for mode in ColorSchemeMode::all() {
            store.set_color_scheme(mode);
            assert_eq!(store.color_scheme(), mode);
        }
        for active in [true, false] {
            store.set_dark_theme_active(active);
            assert_eq!(store.dark_theme_active(), active);
        }
    }

    #[test]
    fn cells_are_independent() {
        let store = PreferenceStore::new();
        store.set_dark_theme_active(true);
        assert_eq!(store.color_scheme(), ColorSchemeMode::System);
        store.set_color_scheme(ColorSchemeMode::Light);
        assert!(store.dark_theme_active());
    }

    #[test]
    fn invalid_raw_value_leaves_state_unchanged() {
        let store = PreferenceStore::new();
        store.set_color_scheme(ColorSchemeMode::Dark);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let _sub = store.subscribe_color_scheme(move |mode| sink.borrow_mut().push(mode));

        assert!(store.try_set_color_scheme("neon").is_err());
        assert_eq!(store.color_scheme(), ColorSchemeMode::Dark);
        assert_eq!(*seen.borrow(), vec![ColorSchemeMode::Dark]);

        store.try_set_color_scheme("light").unwrap();
        assert_eq!(store.color_scheme(), ColorSchemeMode::Light);
    }

    #[test]
    fn update_toggles_dark_theme() {
        let store = PreferenceStore::new();
        store.update_dark_theme_active(|active| !active);
        assert!(store.dark_theme_active());
        store.update_color_scheme(|_| ColorSchemeMode::Dark);
        assert_eq!(store.color_scheme(), ColorSchemeMode::Dark);
    }

    #[test]
    fn clones_share_cells() {
        let store = PreferenceStore::new();
        let handle = store.clone();
        handle.set_color_scheme(ColorSchemeMode::Light);
        assert_eq!(store.color_scheme(), ColorSchemeMode::Light);
        assert_eq!(store.color_scheme_cell().name(), "color_scheme");
        assert_eq!(store.dark_theme_cell().name(), "dark_theme_active");
    }

    #[test]
    fn snapshot_serializes_with_lowercase_scheme() {
        let store = PreferenceStore::from_config(&PreferenceConfig {
            color_scheme: ColorSchemeMode::Dark,
            dark_theme_active: true,
        });
        let json = serde_json::to_value(store.snapshot()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "color_scheme": "dark", "dark_theme_active": true })
        );
    }
}
