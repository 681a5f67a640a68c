//! Reading locale tables from a directory

use crate::error::{L10nError, L10nResult};
use crate::format::{decode_named, Format};
use crate::locale::LocaleCode;
use crate::shape::validate_shape;
use crate::table::LocaleTable;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};

/// Loads `<code>.<ext>` locale files from a base directory
#[derive(Debug, Clone)]
pub struct LocaleLoader {
    base_dir: PathBuf,
}

impl LocaleLoader {
    /// Create a loader rooted at `base_dir`
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Self {
        Self {
            base_dir: base_dir.as_ref().to_path_buf(),
        }
    }

    /// Directory the loader reads from
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Locale files present in the directory, sorted by path.
    ///
    /// Files whose extension is not a decodable format, or whose stem is
    /// not a language tag, are skipped.
    pub fn discover(&self) -> L10nResult<Vec<(LocaleCode, PathBuf)>> {
        let mut found = Vec::new();

        for entry in fs::read_dir(&self.base_dir)? {
            let path = entry?.path();
            if !path.is_file() {
                continue;
            }

            match Format::from_path(&path) {
                Some(format) if format.is_decodable() => {}
                _ => {
                    debug!("Skipping non-locale file: {:?}", path);
                    continue;
                }
            }

            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            match LocaleCode::parse(stem) {
                Ok(code) => found.push((code, path)),
                Err(_) => warn!("Skipping {:?}: file name is not a language tag", path),
            }
        }

        found.sort_by(|a, b| a.1.cmp(&b.1));
        Ok(found)
    }

    /// Load every locale file in the directory
    pub fn load_all(&self) -> L10nResult<Vec<LocaleTable>> {
        let files = self.discover()?;
        info!("Found {} locale files in {:?}", files.len(), self.base_dir);

        files
            .into_iter()
            .map(|(code, path)| Self::load_file_as(&path, &code))
            .collect()
    }

    /// Load the canonical TOML file of one locale
    pub fn load_locale(&self, code: &LocaleCode) -> L10nResult<LocaleTable> {
        let path = self.base_dir.join(code.resource_file());
        if !path.exists() {
            warn!("Locale file does not exist: {:?}", path);
            return Err(L10nError::LocaleNotFound {
                code: code.to_string(),
            });
        }
        Self::load_file_as(&path, code)
    }

    /// Load a single locale file, deriving the expected code from its name
    pub fn load_file(path: &Path) -> L10nResult<LocaleTable> {
        let stem = path
            .file_stem()
            .and_then(|s| s.to_str())
            .ok_or_else(|| L10nError::InvalidLocaleCode(path.display().to_string()))?;
        let code = LocaleCode::parse(stem)?;
        Self::load_file_as(path, &code)
    }

    fn load_file_as(path: &Path, expected: &LocaleCode) -> L10nResult<LocaleTable> {
        let origin = path.display().to_string();
        debug!("Loading locale file: {}", origin);

        let format = Format::from_path(path).unwrap_or(Format::Toml);
        let content = fs::read_to_string(path)?;
        let table = decode_named(&content, format, &origin).map_err(|e| {
            error!("Failed to parse locale file {}: {}", origin, e);
            e
        })?;

        if table.code() != expected {
            return Err(L10nError::CodeMismatch {
                path: origin,
                expected: expected.to_string(),
                found: table.code().to_string(),
            });
        }

        let violations = validate_shape(&table);
        if !violations.is_empty() {
            return Err(L10nError::Shape {
                code: expected.to_string(),
                violations: violations.iter().map(ToString::to_string).collect(),
            });
        }

        debug!(
            "Loaded {} ({} admin keys, {} user keys)",
            expected,
            table.admin.len(),
            table.user.len()
        );
        Ok(table)
    }
}

impl Default for LocaleLoader {
    fn default() -> Self {
        Self::new("locales")
    }
}
