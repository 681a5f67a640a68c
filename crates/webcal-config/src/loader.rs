//! Configuration loading utilities

use crate::Config;
use std::env;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};
use webcal_common::WebcalError;

/// Environment variable naming an explicit configuration file
pub const CONFIG_PATH_VAR: &str = "WEBCAL_L10N_CONFIG";

/// Files looked for in the working directory, in order
pub const DEFAULT_CONFIG_FILES: [&str; 3] = ["webcal-l10n.yaml", "webcal-l10n.yml", "webcal-l10n.toml"];

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O error when reading configuration file
    #[error("Failed to read configuration file: {0}")]
    IoError(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML configuration: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// TOML parsing error
    #[error("Failed to parse TOML configuration: {0}")]
    TomlError(#[from] toml::de::Error),

    /// Configuration validation error
    #[error("Configuration validation failed: {0}")]
    ValidationError(#[from] validator::ValidationErrors),

    /// Environment variable parsing error
    #[error("Failed to parse environment variable '{var}': {source}")]
    EnvParseError {
        /// Offending variable
        var: String,
        /// Parse failure
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// File extension is neither YAML nor TOML
    #[error("Unsupported configuration format: {}", .0.display())]
    UnsupportedFormat(PathBuf),
}

impl From<ConfigError> for WebcalError {
    fn from(err: ConfigError) -> Self {
        WebcalError::config_with_source(err.to_string(), err)
    }
}

/// Configuration loader for the application
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load a YAML or TOML file (chosen by extension) with environment
    /// variable overrides
    pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
        Self::load_config_with(path, |var| env::var(var).ok())
    }

    /// Like [`ConfigLoader::load_config`], reading overrides through `lookup`
    pub fn load_config_with<P, F>(path: P, lookup: F) -> Result<Config, ConfigError>
    where
        P: AsRef<Path>,
        F: Fn(&str) -> Option<String>,
    {
        let path = path.as_ref();
        let mut config = Self::parse_file(path)?;

        Self::apply_overrides(&mut config, lookup)?;
        config.validate_all()?;

        info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    fn parse_file(path: &Path) -> Result<Config, ConfigError> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);

        let content = std::fs::read_to_string(path)?;
        match extension.as_deref() {
            Some("yaml" | "yml") => Ok(serde_yaml::from_str(&content)?),
            Some("toml") => Ok(toml::from_str(&content)?),
            _ => Err(ConfigError::UnsupportedFormat(path.to_path_buf())),
        }
    }

    /// Load configuration from the environment and well-known files,
    /// falling back to defaults
    pub fn load() -> Result<Config, ConfigError> {
        if let Ok(config_path) = env::var(CONFIG_PATH_VAR) {
            return Self::load_config(config_path);
        }

        if let Some(path) = DEFAULT_CONFIG_FILES.iter().map(Path::new).find(|p| p.exists()) {
            return Self::load_config(path);
        }

        debug!("No configuration file found, using defaults");
        let mut config = Config::default();
        Self::apply_env_overrides(&mut config)?;
        config.validate_all()?;
        Ok(config)
    }

    /// Load configuration from a specific file, or discover one when `None`
    pub fn load_from(path: Option<&Path>) -> Result<Config, ConfigError> {
        match path {
            Some(path) => Self::load_config(path),
            None => Self::load(),
        }
    }

    /// Apply environment variable overrides to configuration
    pub fn apply_env_overrides(config: &mut Config) -> Result<(), ConfigError> {
        Self::apply_overrides(config, |var| env::var(var).ok())
    }

    /// Apply overrides read through `lookup`
    pub fn apply_overrides<F>(config: &mut Config, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Locale source
        if let Some(dir) = lookup("WEBCAL_LOCALES_DIR") {
            config.locales.dir = PathBuf::from(dir);
            config.locales.bundled = false;
        }

        if let Some(code) = lookup("WEBCAL_DEFAULT_LOCALE") {
            config.locales.default_locale = code;
        }

        if let Some(code) = lookup("WEBCAL_REFERENCE_LOCALE") {
            config.locales.reference_locale = code;
        }

        // Audit policy
        if let Some(flag) = lookup("WEBCAL_AUDIT_FAIL_ON_MISSING") {
            config.audit.fail_on_missing = flag.trim().parse().map_err(|e| ConfigError::EnvParseError {
                var: "WEBCAL_AUDIT_FAIL_ON_MISSING".to_string(),
                source: Box::new(e),
            })?;
        }

        // Logging
        if let Some(level) = lookup("WEBCAL_LOG_LEVEL") {
            config.logging.level = level;
        }

        if let Some(format) = lookup("WEBCAL_LOG_FORMAT") {
            config.logging.format = format;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_test_config_file(content: &str, suffix: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(suffix)
            .tempfile()
            .expect("Failed to create temp file");
        file.write_all(content.as_bytes()).expect("Failed to write to temp file");
        file
    }

    fn no_env(_: &str) -> Option<String> {
        None
    }

    fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |var| vars.get(var).cloned()
    }

    #[test]
    fn test_load_yaml_config() {
        let yaml = "locales:\n  dir: /srv/calendar/lang\n  default_locale: es\naudit:\n  fail_on_missing: true\nlogging:\n  level: debug\n  format: json\n";
        let file = create_test_config_file(yaml, ".yaml");

        let config = ConfigLoader::load_config_with(file.path(), no_env).unwrap();
        assert_eq!(config.locales.dir, PathBuf::from("/srv/calendar/lang"));
        assert_eq!(config.locales.default_locale, "es");
        assert_eq!(config.locales.reference_locale, "en");
        assert!(config.audit.fail_on_missing);
        assert!(config.audit.fail_on_placeholder_mismatch);
        assert_eq!(config.logging.format, "json");
    }

    #[test]
    fn test_load_toml_config() {
        let toml = "[locales]\nbundled = true\nreference_locale = \"nl\"\n\n[logging]\nlevel = \"warn\"\n";
        let file = create_test_config_file(toml, ".toml");

        let config = ConfigLoader::load_config_with(file.path(), no_env).unwrap();
        assert!(config.locales.bundled);
        assert_eq!(config.locales.reference_locale, "nl");
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn test_invalid_yaml() {
        let file = create_test_config_file("locales:\n  dir: [unclosed", ".yml");
        let result = ConfigLoader::load_config_with(file.path(), no_env);
        assert!(matches!(result, Err(ConfigError::YamlError(_))));
    }

    #[test]
    fn test_unknown_fields_rejected() {
        let file = create_test_config_file("[locales]\ndirectory = \"x\"\n", ".toml");
        let result = ConfigLoader::load_config_with(file.path(), no_env);
        assert!(matches!(result, Err(ConfigError::TomlError(_))));
    }

    #[test]
    fn test_validation_error() {
        let file = create_test_config_file("locales:\n  default_locale: \"12\"\n", ".yaml");
        let result = ConfigLoader::load_config_with(file.path(), no_env);
        assert!(matches!(result, Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn test_unsupported_extension() {
        let file = create_test_config_file("{}", ".json");
        let result = ConfigLoader::load_config_with(file.path(), no_env);
        assert!(matches!(result, Err(ConfigError::UnsupportedFormat(_))));
    }

    #[test]
    fn test_missing_config_file() {
        let result = ConfigLoader::load_config_with("/nonexistent/webcal-l10n.yaml", no_env);
        assert!(matches!(result, Err(ConfigError::IoError(_))));
    }

    #[test]
    fn test_environment_overrides() {
        let file = create_test_config_file("locales:\n  bundled: true\n", ".yaml");
        let lookup = env_from(&[
            ("WEBCAL_LOCALES_DIR", "/tmp/lang"),
            ("WEBCAL_DEFAULT_LOCALE", "it"),
            ("WEBCAL_REFERENCE_LOCALE", "es"),
            ("WEBCAL_AUDIT_FAIL_ON_MISSING", "true"),
            ("WEBCAL_LOG_LEVEL", "trace"),
            ("WEBCAL_LOG_FORMAT", "compact"),
        ]);

        let config = ConfigLoader::load_config_with(file.path(), lookup).unwrap();
        assert_eq!(config.locales.dir, PathBuf::from("/tmp/lang"));
        assert!(!config.locales.bundled);
        assert_eq!(config.locales.default_locale, "it");
        assert_eq!(config.locales.reference_locale, "es");
        assert!(config.audit.fail_on_missing);
        assert_eq!(config.logging.level, "trace");
        assert_eq!(config.logging.format, "compact");
    }

    #[test]
    fn test_env_parse_error() {
        let mut config = Config::default();
        let result = ConfigLoader::apply_overrides(
            &mut config,
            env_from(&[("WEBCAL_AUDIT_FAIL_ON_MISSING", "sometimes")]),
        );
        match result {
            Err(ConfigError::EnvParseError { var, .. }) => {
                assert_eq!(var, "WEBCAL_AUDIT_FAIL_ON_MISSING");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_converts_into_webcal_error() {
        let err: WebcalError = ConfigError::UnsupportedFormat(PathBuf::from("x.ini")).into();
        assert!(err.to_string().contains("x.ini"));
    }
}
