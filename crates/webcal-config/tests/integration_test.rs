//! Integration tests for configuration loading

use std::path::PathBuf;
use webcal_common::test_utils::{create_temp_dir, write_fixture};
use webcal_common::{LogFormat, WebcalError};
use webcal_config::{Config, ConfigError, ConfigLoader};

#[test]
fn test_yaml_and_toml_describe_the_same_config() {
    let dir = create_temp_dir();
    let yaml = write_fixture(
        dir.path(),
        "webcal-l10n.yaml",
        "locales:\n  dir: lang\n  default_locale: nl\naudit:\n  report_untranslated: false\n",
    );
    let toml = write_fixture(
        dir.path(),
        "webcal-l10n.toml",
        "[locales]\ndir = \"lang\"\ndefault_locale = \"nl\"\n\n[audit]\nreport_untranslated = false\n",
    );

    let from_yaml = ConfigLoader::load_config_with(&yaml, |_| None).unwrap();
    let from_toml = ConfigLoader::load_config_with(&toml, |_| None).unwrap();
    assert_eq!(from_yaml, from_toml);
    assert_eq!(from_yaml.locales.dir, PathBuf::from("lang"));
    assert!(!from_yaml.audit.report_untranslated);
}

#[test]
fn test_serialized_defaults_load_back() {
    let dir = create_temp_dir();
    let yaml = serde_yaml::to_string(&Config::default()).unwrap();
    let path = write_fixture(dir.path(), "defaults.yml", &yaml);

    let config = ConfigLoader::load_config_with(&path, |_| None).unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn test_logging_settings_feed_the_subscriber_config() {
    let dir = create_temp_dir();
    let path = write_fixture(
        dir.path(),
        "webcal-l10n.yaml",
        "logging:\n  level: webcal_l10n=debug\n  format: compact\n  file: l10n.log\n",
    );

    let config = ConfigLoader::load_from(Some(&path)).unwrap();
    let logging = config.logging.to_logging_config();
    assert_eq!(logging.level, "webcal_l10n=debug");
    assert_eq!(logging.format, LogFormat::Compact);
    assert_eq!(logging.file_path, Some(PathBuf::from("l10n.log")));
}

#[test]
fn test_errors_convert_to_umbrella_type() {
    let result = ConfigLoader::load_config_with("/nonexistent/webcal-l10n.toml", |_| None);
    let err: WebcalError = match result {
        Err(err @ ConfigError::IoError(_)) => err.into(),
        other => panic!("unexpected result: {other:?}"),
    };
    assert!(matches!(err, WebcalError::Config { .. }));
}
