//! Encoding and decoding locale tables in the supported file formats

use crate::error::{L10nError, L10nResult};
use crate::ftl;
use crate::table::LocaleTable;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// A locale table serialization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    /// Canonical on-disk format
    Toml,
    /// JSON object with `meta`, `calendar`, `admin` and `user` members
    Json,
    /// YAML mapping mirroring the JSON layout
    Yaml,
    /// Fluent resource (export only)
    Fluent,
}

impl Format {
    /// Every format, canonical first
    pub const ALL: [Format; 4] = [Format::Toml, Format::Json, Format::Yaml, Format::Fluent];

    /// Human readable name
    pub fn name(self) -> &'static str {
        match self {
            Self::Toml => "TOML",
            Self::Json => "JSON",
            Self::Yaml => "YAML",
            Self::Fluent => "Fluent",
        }
    }

    /// Preferred file extension
    pub fn extension(self) -> &'static str {
        match self {
            Self::Toml => "toml",
            Self::Json => "json",
            Self::Yaml => "yaml",
            Self::Fluent => "ftl",
        }
    }

    /// Guess the format from a file extension
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "toml" => Some(Self::Toml),
            "json" => Some(Self::Json),
            "yaml" | "yml" => Some(Self::Yaml),
            "ftl" => Some(Self::Fluent),
            _ => None,
        }
    }

    /// Guess the format from a path
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
    }

    /// Whether tables can be read back from this format
    pub fn is_decodable(self) -> bool {
        !matches!(self, Self::Fluent)
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for Format {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "fluent" => Ok(Self::Fluent),
            other => Self::from_extension(other)
                .ok_or_else(|| format!("unknown format '{s}' (expected toml, json, yaml or ftl)")),
        }
    }
}

/// Decode an in-memory document
pub fn decode(source: &str, format: Format) -> L10nResult<LocaleTable> {
    decode_named(source, format, "<inline>")
}

/// Decode a document, naming `origin` in parse errors
pub fn decode_named(source: &str, format: Format, origin: &str) -> L10nResult<LocaleTable> {
    let parse_error = |message: String| L10nError::Parse {
        path: origin.to_string(),
        message,
    };

    match format {
        Format::Toml => toml::from_str(source).map_err(|e| parse_error(e.message().to_string())),
        Format::Json => serde_json::from_str(source).map_err(|e| parse_error(e.to_string())),
        Format::Yaml => serde_yaml::from_str(source).map_err(|e| parse_error(e.to_string())),
        Format::Fluent => Err(L10nError::Unsupported {
            format: Format::Fluent.name(),
            operation: "decoding",
        }),
    }
}

/// Encode a table. The output for a given table is deterministic, so
/// decoding and re-encoding it yields byte-identical text.
pub fn encode(table: &LocaleTable, format: Format) -> L10nResult<String> {
    let serialize_error = |message: String| L10nError::Serialize {
        format: format.name(),
        message,
    };

    match format {
        Format::Toml => toml::to_string(table).map_err(|e| serialize_error(e.to_string())),
        Format::Json => serde_json::to_string_pretty(table)
            .map(|mut json| {
                json.push('\n');
                json
            })
            .map_err(|e| serialize_error(e.to_string())),
        Format::Yaml => serde_yaml::to_string(table).map_err(|e| serialize_error(e.to_string())),
        Format::Fluent => Ok(ftl::to_ftl(table)),
    }
}
