//! Environment loading and preference session wiring.

use hue_prefs::{PreferenceConfig, PreferenceSnapshot, PreferenceStore, Subscription};
use hue_telemetry::LoggingConfig;
use tracing::info;

use crate::error::{AppError, AppResult};

/// Dependencies required to bootstrap the Hue application.
#[derive(Debug, Clone)]
pub struct BootstrapDependencies {
    /// Logging configuration for the global subscriber.
    pub logging: LoggingConfig<'static>,
    /// Initial preference values.
    pub preferences: PreferenceConfig,
}

impl BootstrapDependencies {
    /// Construct production dependencies from the environment.
    ///
    /// # Errors
    ///
    /// Returns an error when a preference variable holds an invalid value.
    pub fn from_env() -> AppResult<Self> {
        let logging = LoggingConfig::from_env();
        let preferences = PreferenceConfig::from_env()
            .map_err(|err| AppError::preferences("preference_config.from_env", err))?;
        Ok(Self {
            logging,
            preferences,
        })
    }
}

/// Running preference state plus the observers wired at startup.
#[derive(Debug)]
pub struct PreferenceSession {
    store: PreferenceStore,
    observers: Vec<Subscription>,
}

impl PreferenceSession {
    /// Build a store from `config` and attach logging observers to both cells.
    #[must_use]
    pub fn start(config: &PreferenceConfig) -> Self {
        let store = PreferenceStore::from_config(config);
        let observers = vec![
            store.subscribe_color_scheme(|mode| {
                info!(color_scheme = %mode, "color scheme preference active");
            }),
            store.subscribe_dark_theme_active(|active| {
                info!(dark_theme_active = active, "dark theme flag active");
            }),
        ];
        Self { store, observers }
    }

    /// Shared handle to the preference store.
    #[must_use]
    pub const fn store(&self) -> &PreferenceStore {
        &self.store
    }

    /// Current values of both preferences.
    #[must_use]
    pub fn snapshot(&self) -> PreferenceSnapshot {
        self.store.snapshot()
    }

    /// Detach the startup observers, returning how many were still attached.
    pub fn shutdown(self) -> usize {
        self.observers
            .into_iter()
            .map(Subscription::unsubscribe)
            .filter(|detached| *detached)
            .count()
    }
}

/// Bootstrap from the environment.
///
/// # Errors
///
/// Returns an error if configuration is invalid or logging cannot be installed.
pub fn run_app() -> AppResult<()> {
    let dependencies = BootstrapDependencies::from_env()?;
    run_app_with(&dependencies)
}

/// Bootstrap with explicit dependencies: install logging, start the session,
/// and report its initial state.
///
/// # Errors
///
/// Returns an error if logging cannot be installed or the snapshot cannot be
/// rendered.
pub fn run_app_with(dependencies: &BootstrapDependencies) -> AppResult<()> {
    hue_telemetry::init_logging(&dependencies.logging)
        .map_err(|err| AppError::telemetry("telemetry.init_logging", err))?;

    let session = PreferenceSession::start(&dependencies.preferences);
    let snapshot = serde_json::to_string(&session.snapshot())
        .map_err(|source| AppError::Snapshot { source })?;
    info!(
        build_sha = hue_telemetry::build_sha(),
        snapshot = %snapshot,
        "preference session started"
    );

    let detached = session.shutdown();
    info!(observers = detached, "preference session stopped");
    Ok(())
}
