//! Locale tables embedded in the binary

use crate::catalog::Catalog;
use crate::error::L10nResult;
use crate::format::{decode_named, Format};
use crate::locale::LocaleCode;
use crate::table::LocaleTable;
use once_cell::sync::Lazy;

/// Locale the bundled catalog falls back to
pub const DEFAULT_LOCALE: &str = "en";

/// Shipped locale files as `(code, source)` pairs
pub const BUNDLED_SOURCES: [(&str, &str); 6] = [
    ("en", include_str!("../../../locales/en.toml")),
    ("es", include_str!("../../../locales/es.toml")),
    ("it", include_str!("../../../locales/it.toml")),
    ("nl", include_str!("../../../locales/nl.toml")),
    ("pl", include_str!("../../../locales/pl.toml")),
    ("ro", include_str!("../../../locales/ro.toml")),
];

static SHARED: Lazy<Catalog> = Lazy::new(|| {
    Catalog::bundled().expect("bundled locale tables are validated by the build script")
});

/// Decode every shipped table
pub fn bundled_tables() -> L10nResult<Vec<LocaleTable>> {
    BUNDLED_SOURCES
        .iter()
        .map(|(code, source)| decode_named(source, Format::Toml, &format!("<bundled {code}.toml>")))
        .collect()
}

impl Catalog {
    /// Build a catalog from the shipped tables, with `en` as default
    pub fn bundled() -> L10nResult<Self> {
        Self::new(LocaleCode::parse(DEFAULT_LOCALE)?, bundled_tables()?)
    }

    /// Process-wide bundled catalog, built on first use
    pub fn shared() -> &'static Catalog {
        &SHARED
    }
}
