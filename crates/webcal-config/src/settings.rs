//! Configuration structures

use crate::validation;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use validator::{Validate, ValidationErrors};
use webcal_common::{LogFormat, LoggingConfig};

/// Main configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, Default)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Where locale tables come from
    #[validate(nested)]
    pub locales: LocalesSettings,

    /// Completeness audit policy
    pub audit: AuditSettings,

    /// Logging output
    #[validate(nested)]
    pub logging: LoggingSettings,
}

/// Locale table source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default, deny_unknown_fields)]
pub struct LocalesSettings {
    /// Directory holding `<code>.toml` files
    pub dir: PathBuf,

    /// Locale used when a key is missing
    #[validate(length(min = 2, message = "Default locale cannot be empty"))]
    pub default_locale: String,

    /// Locale other locales are audited against
    #[validate(length(min = 2, message = "Reference locale cannot be empty"))]
    pub reference_locale: String,

    /// Use the tables compiled into the binary instead of `dir`
    pub bundled: bool,
}

/// Which audit findings fail the `audit` command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AuditSettings {
    /// Keys missing relative to the reference locale
    pub fail_on_missing: bool,
    /// Placeholder tokens that differ from the reference locale
    pub fail_on_placeholder_mismatch: bool,
    /// List values identical to the reference locale
    pub report_untranslated: bool,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingSettings {
    /// Filter directive (trace, debug, info, warn, error, or `target=level` pairs)
    #[validate(length(min = 1, message = "Log level cannot be empty"))]
    pub level: String,

    /// Output format: pretty, compact or json
    pub format: String,

    /// Optional log file path
    pub file: Option<PathBuf>,
}

impl Default for LocalesSettings {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("locales"),
            default_locale: "en".to_string(),
            reference_locale: "en".to_string(),
            bundled: false,
        }
    }
}

impl Default for AuditSettings {
    fn default() -> Self {
        Self {
            fail_on_missing: false,
            fail_on_placeholder_mismatch: true,
            report_untranslated: true,
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
            file: None,
        }
    }
}

impl Config {
    /// Derive validation plus the checks the derive cannot express
    pub fn validate_all(&self) -> Result<(), ValidationErrors> {
        self.validate()?;

        let mut errors = ValidationErrors::new();

        if let Err(err) = validation::validate_locale_code(&self.locales.default_locale) {
            errors.add("default_locale", err);
        }
        if let Err(err) = validation::validate_locale_code(&self.locales.reference_locale) {
            errors.add("reference_locale", err);
        }
        if !self.locales.bundled {
            if let Err(err) = validation::validate_file_path(&self.locales.dir.to_string_lossy()) {
                errors.add("dir", err);
            }
        }
        if let Err(err) = validation::validate_log_level(&self.logging.level) {
            errors.add("level", err);
        }
        if let Err(err) = validation::validate_log_format(&self.logging.format) {
            errors.add("format", err);
        }
        if let Some(file) = &self.logging.file {
            if let Err(err) = validation::validate_file_path(&file.to_string_lossy()) {
                errors.add("file", err);
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

impl LoggingSettings {
    /// Settings for [`webcal_common::init_logging`]; an unknown format
    /// falls back to pretty output
    pub fn to_logging_config(&self) -> LoggingConfig {
        LoggingConfig {
            level: self.level.clone(),
            format: self.format.parse().unwrap_or(LogFormat::Pretty),
            file_path: self.file.clone(),
            ..LoggingConfig::default()
        }
    }
}
