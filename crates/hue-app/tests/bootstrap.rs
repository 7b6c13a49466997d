use hue_app::{AppError, BootstrapDependencies, PreferenceSession, run_app_with};
use hue_prefs::{ColorSchemeMode, PreferenceConfig};
use hue_telemetry::{LogFormat, LoggingConfig};
use hue_test_support::Recorder;

fn dependencies() -> BootstrapDependencies {
    BootstrapDependencies {
        logging: LoggingConfig {
            level: "debug",
            format: LogFormat::Json,
            build_sha: "test",
        },
        preferences: PreferenceConfig {
            color_scheme: ColorSchemeMode::Light,
            dark_theme_active: false,
        },
    }
}

#[test]
fn bootstrap_installs_logging_once() -> anyhow::Result<()> {
    run_app_with(&dependencies())?;

    let err = run_app_with(&dependencies()).expect_err("logging is already installed");
    assert!(matches!(
        err,
        AppError::Telemetry {
            operation: "telemetry.init_logging",
            ..
        }
    ));
    Ok(())
}

#[test]
fn session_store_is_shared_with_consumers() {
    let session = PreferenceSession::start(&dependencies().preferences);
    let consumer = session.store().clone();
    let flags = Recorder::new();
    let sub = consumer.subscribe_dark_theme_active(flags.handler());

    session.store().set_dark_theme_active(true);
    assert_eq!(flags.values(), vec![false, true]);
    assert_eq!(consumer.color_scheme(), ColorSchemeMode::Light);

    assert!(sub.unsubscribe());
    assert_eq!(session.shutdown(), 2);
}
