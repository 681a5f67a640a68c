//! Locale identifiers

use crate::error::{L10nError, L10nResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use unic_langid::LanguageIdentifier;

/// A validated, canonicalized language tag such as `es` or `pt-BR`.
///
/// Locale tables are keyed by the bare ISO 639 language code; region
/// subtags are accepted so requested tags can be negotiated down to a
/// shipped locale.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LocaleCode {
    code: String,
    language: String,
}

impl LocaleCode {
    /// Parse and canonicalize a language tag
    pub fn parse(code: &str) -> L10nResult<Self> {
        let trimmed = code.trim();
        if trimmed.is_empty() {
            return Err(L10nError::InvalidLocaleCode(code.to_string()));
        }

        let lang_id: LanguageIdentifier = trimmed
            .replace('_', "-")
            .parse()
            .map_err(|_| L10nError::InvalidLocaleCode(code.to_string()))?;

        let language = lang_id.language.as_str().to_string();
        if language == "und" {
            return Err(L10nError::InvalidLocaleCode(code.to_string()));
        }

        Ok(Self {
            code: lang_id.to_string(),
            language,
        })
    }

    /// Canonical tag, e.g. `es` or `pt-BR`
    pub fn as_str(&self) -> &str {
        &self.code
    }

    /// Primary language subtag, e.g. `pt` for `pt-BR`
    pub fn language(&self) -> &str {
        &self.language
    }

    /// The bare-language form of this tag
    pub fn base(&self) -> Self {
        Self {
            code: self.language.clone(),
            language: self.language.clone(),
        }
    }

    /// Whether the tag carries nothing beyond the language subtag
    pub fn is_base(&self) -> bool {
        self.code == self.language
    }

    /// Convert to a Fluent language identifier
    pub fn to_language_identifier(&self) -> L10nResult<LanguageIdentifier> {
        self.code
            .parse()
            .map_err(|_| L10nError::InvalidLocaleCode(self.code.clone()))
    }

    /// File name of this locale's table inside a locales directory
    pub fn resource_file(&self) -> String {
        format!("{}.toml", self.code)
    }
}

impl fmt::Display for LocaleCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.code)
    }
}

impl FromStr for LocaleCode {
    type Err = L10nError;

    fn from_str(s: &str) -> L10nResult<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for LocaleCode {
    type Error = L10nError;

    fn try_from(value: String) -> L10nResult<Self> {
        Self::parse(&value)
    }
}

impl From<LocaleCode> for String {
    fn from(code: LocaleCode) -> Self {
        code.code
    }
}

impl AsRef<str> for LocaleCode {
    fn as_ref(&self) -> &str {
        &self.code
    }
}
