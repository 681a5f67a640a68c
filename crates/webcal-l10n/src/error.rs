//! Error types for locale table operations

use thiserror::Error;

/// Errors that can occur while loading, querying or converting locale tables
#[derive(Error, Debug)]
pub enum L10nError {
    /// Requested language is not shipped
    #[error("Locale not found: {code}")]
    LocaleNotFound {
        /// Requested locale code
        code: String,
    },

    /// Key missing in the requested locale and in the default locale
    #[error("Key '{key}' not found in locale {locale} or its fallback")]
    KeyNotFound {
        /// Requested key
        key: String,
        /// Locale the lookup started from
        locale: String,
    },

    /// Not a usable language identifier
    #[error("Invalid locale code: {0}")]
    InvalidLocaleCode(String),

    /// Failed to parse a locale document
    #[error("Failed to parse locale table {path}: {message}")]
    Parse {
        /// File path, or `<inline>` for in-memory sources
        path: String,
        /// Parser diagnostic
        message: String,
    },

    /// Failed to render a table in the requested format
    #[error("Failed to serialize locale table as {format}: {message}")]
    Serialize {
        /// Target format name
        format: &'static str,
        /// Serializer diagnostic
        message: String,
    },

    /// File stem and `meta.code` disagree
    #[error("Locale file {path} declares code '{found}', expected '{expected}'")]
    CodeMismatch {
        /// File path
        path: String,
        /// Code derived from the file name
        expected: String,
        /// Code declared inside the file
        found: String,
    },

    /// The same locale was supplied twice
    #[error("Duplicate locale: {0}")]
    DuplicateLocale(String),

    /// Calendar vocabulary does not have the required shape
    #[error("Locale {code} has a malformed calendar vocabulary: {}", .violations.join("; "))]
    Shape {
        /// Offending locale
        code: String,
        /// One entry per violation
        violations: Vec<String>,
    },

    /// Format cannot be used for this direction
    #[error("{format} does not support {operation}")]
    Unsupported {
        /// Format name
        format: &'static str,
        /// "decoding" or "encoding"
        operation: &'static str,
    },

    /// Calendar vocabulary index out of range
    #[error("{what} index {index} out of range (0..{len})")]
    IndexOutOfRange {
        /// Vocabulary array name
        what: &'static str,
        /// Requested index
        index: usize,
        /// Array length
        len: usize,
    },

    /// Exported Fluent resource failed to parse or load
    #[error("Fluent export for {code} is invalid: {}", .errors.join("; "))]
    Fluent {
        /// Locale being exported
        code: String,
        /// Parser or bundle diagnostics
        errors: Vec<String>,
    },

    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl L10nError {
    pub(crate) fn key_not_found(key: &str, locale: &str) -> Self {
        Self::KeyNotFound {
            key: key.to_string(),
            locale: locale.to_string(),
        }
    }

    /// Whether this error signals missing data rather than broken input
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::LocaleNotFound { .. } | Self::KeyNotFound { .. })
    }
}

impl From<L10nError> for webcal_common::WebcalError {
    fn from(err: L10nError) -> Self {
        let locale = match &err {
            L10nError::LocaleNotFound { code } => Some(code.clone()),
            L10nError::KeyNotFound { locale, .. } => Some(locale.clone()),
            L10nError::Shape { code, .. } | L10nError::Fluent { code, .. } => Some(code.clone()),
            _ => None,
        };
        webcal_common::WebcalError::localization_with_source(err.to_string(), locale, err)
    }
}

/// Result type for locale table operations
pub type L10nResult<T> = Result<T, L10nError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;
    use webcal_common::WebcalError;

    #[test]
    fn test_converts_into_webcal_error_with_locale() {
        let err: WebcalError = L10nError::key_not_found("hdr_view_1", "ro").into();
        assert!(matches!(err, WebcalError::Localization { .. }));
        assert_eq!(err.locale(), Some("ro"));
        assert!(err.to_string().contains("hdr_view_1"));

        let source = err.source().and_then(|s| s.downcast_ref::<L10nError>());
        assert!(matches!(source, Some(L10nError::KeyNotFound { key, .. }) if key == "hdr_view_1"));
    }

    #[test]
    fn test_conversion_without_locale() {
        let err: WebcalError = L10nError::InvalidLocaleCode("not a tag".to_string()).into();
        assert_eq!(err.locale(), None);
        assert!(err.to_string().contains("not a tag"));
    }

    #[test]
    fn test_is_not_found() {
        assert!(L10nError::LocaleNotFound { code: "xx".to_string() }.is_not_found());
        assert!(!L10nError::DuplicateLocale("es".to_string()).is_not_found());
    }
}
