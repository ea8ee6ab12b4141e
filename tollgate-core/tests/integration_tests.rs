//! Integration tests for tollgate-core infrastructure

use chrono::Duration;
use tollgate_core::{
    config_error, init_logging, not_found_error, validation_error, LogFormat, LoggingConfig,
    ManualTimeSource, TimeSource, TollgateConfig, TollgateError,
};

#[test]
fn test_error_handling() {
    let error = not_found_error!("role GUEST", "roles");

    match &error {
        TollgateError::NotFound { resource, context } => {
            assert_eq!(resource, "role GUEST");
            assert_eq!(context.component, "roles");
            assert!(!context.error_id.is_empty());
        }
        _ => panic!("Expected NotFound error"),
    }

    // Logging an error must never panic, subscriber or not
    error.log();
    assert!(!error.is_recoverable());

    let config_error = config_error!("Invalid config", "test");
    assert!(config_error.context().is_some());
    assert!(!config_error.is_recoverable());

    let validation = validation_error!("too short", "password", "users");
    assert_eq!(validation.to_string(), "Validation error: too short");
}

#[test]
fn test_config_file_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tollgate.toml");

    let mut config = TollgateConfig::default();
    config.security.authentication_timeout_secs = 120;
    config.server.port = 9090;
    config.logging.format = LogFormat::Json;
    config.save_to_file(&path).unwrap();

    let loaded = TollgateConfig::from_file(&path).unwrap();
    assert_eq!(loaded.security.authentication_timeout_secs, 120);
    assert_eq!(loaded.server.port, 9090);
    assert_eq!(loaded.logging.format, LogFormat::Json);
}

#[test]
fn test_config_rejects_invalid_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.toml");
    std::fs::write(&path, "[security\nhash_iterations = ").unwrap();

    assert!(matches!(
        TollgateConfig::from_file(&path),
        Err(TollgateError::Config { .. })
    ));

    let missing = dir.path().join("missing.toml");
    assert!(TollgateConfig::from_file(&missing).is_err());
}

#[test]
fn test_config_file_is_validated() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("zero.toml");
    std::fs::write(&path, "[security]\nhash_iterations = 0\n").unwrap();

    assert!(matches!(
        TollgateConfig::from_file(&path),
        Err(TollgateError::Validation { .. })
    ));
}

#[test]
fn test_logging_initialization() {
    let config = LoggingConfig {
        level: "debug".to_string(),
        format: LogFormat::Compact,
        filter_directives: vec!["tollgate_core=debug".to_string()],
        ..LoggingConfig::default()
    };

    // A second global subscriber is refused, the first call wins
    let first = init_logging(&config);
    let second = init_logging(&config);
    assert!(first.is_ok() || second.is_err());
}

#[test]
fn test_manual_clock_is_shared_between_threads() {
    let clock = std::sync::Arc::new(ManualTimeSource::new());

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let clock = clock.clone();
            std::thread::spawn(move || clock.advance(Duration::milliseconds(250)))
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(clock.millis_from_epoch(), 1000);
}
