//! Field validators used by [`Config::validate_all`](crate::Config::validate_all)

use unic_langid::LanguageIdentifier;
use validator::ValidationError;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];
const LOG_FORMATS: [&str; 3] = ["pretty", "compact", "json"];

/// Validate a BCP 47 language tag such as `es` or `pt-BR`
pub fn validate_locale_code(code: &str) -> Result<(), ValidationError> {
    if code.trim().is_empty() {
        return Err(ValidationError::new("empty_locale_code"));
    }

    match code.replace('_', "-").parse::<LanguageIdentifier>() {
        Ok(id) if id.language.as_str() != "und" => Ok(()),
        _ => Err(ValidationError::new("invalid_locale_code")),
    }
}

/// Validate a log level, optionally prefixed with a target (`webcal_l10n=debug`)
pub fn validate_log_level(level: &str) -> Result<(), ValidationError> {
    let valid = level.split(',').all(|directive| {
        let level = directive.rsplit('=').next().unwrap_or_default().trim();
        LOG_LEVELS.contains(&level.to_ascii_lowercase().as_str())
    });

    if valid {
        Ok(())
    } else {
        Err(ValidationError::new("invalid_log_level"))
    }
}

/// Validate a log output format name
pub fn validate_log_format(format: &str) -> Result<(), ValidationError> {
    if LOG_FORMATS.contains(&format.to_ascii_lowercase().as_str()) {
        Ok(())
    } else {
        Err(ValidationError::new("invalid_log_format"))
    }
}

/// Validate a file path (basic check for characters most filesystems reject)
pub fn validate_file_path(path: &str) -> Result<(), ValidationError> {
    if path.is_empty() {
        return Err(ValidationError::new("empty_file_path"));
    }

    let invalid_chars = ['<', '>', '"', '|', '?', '*'];
    if path.chars().any(|c| invalid_chars.contains(&c)) {
        return Err(ValidationError::new("invalid_file_path_characters"));
    }

    Ok(())
}
