//! The locale table loader: lookups with fallback to a default locale

use crate::error::{L10nError, L10nResult};
use crate::loader::LocaleLoader;
use crate::locale::LocaleCode;
use crate::placeholder::substitute;
use crate::shape::validate_shape;
use crate::table::{LocaleTable, MonthStyle, TableKind, WeekdayStyle, DHM_COUNT, MONTH_COUNT};
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Where a resolved string came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lookup<'a> {
    /// The localized string, placeholders untouched
    pub value: &'a str,
    /// Locale that supplied the value
    pub locale: &'a LocaleCode,
    /// Dictionary that supplied the value
    pub table: TableKind,
    /// Whether the value came from the default locale
    pub fell_back: bool,
}

/// Immutable set of locale tables with one designated default locale.
///
/// Any number of threads may query a catalog concurrently; tables are
/// shared behind `Arc` and never mutated after construction.
#[derive(Debug, Clone)]
pub struct Catalog {
    default_locale: LocaleCode,
    fallback: Arc<LocaleTable>,
    tables: BTreeMap<LocaleCode, Arc<LocaleTable>>,
}

impl Catalog {
    /// Build a catalog from tables.
    ///
    /// Every table must be well-formed, codes must be unique and the
    /// default locale must be among them.
    pub fn new<I>(default_locale: LocaleCode, tables: I) -> L10nResult<Self>
    where
        I: IntoIterator<Item = LocaleTable>,
    {
        let mut map = BTreeMap::new();

        for table in tables {
            let violations = validate_shape(&table);
            if !violations.is_empty() {
                return Err(L10nError::Shape {
                    code: table.code().to_string(),
                    violations: violations.iter().map(ToString::to_string).collect(),
                });
            }

            let code = table.code().clone();
            if map.insert(code.clone(), Arc::new(table)).is_some() {
                return Err(L10nError::DuplicateLocale(code.to_string()));
            }
        }

        let fallback = map
            .get(&default_locale)
            .cloned()
            .ok_or_else(|| L10nError::LocaleNotFound {
                code: default_locale.to_string(),
            })?;

        info!(
            "Catalog initialized with {} locales, default locale: {}",
            map.len(),
            default_locale
        );
        Ok(Self {
            default_locale,
            fallback,
            tables: map,
        })
    }

    /// Load every locale file in `dir`
    pub fn load_dir<P: AsRef<Path>>(dir: P, default_locale: LocaleCode) -> L10nResult<Self> {
        let tables = LocaleLoader::new(dir).load_all()?;
        Self::new(default_locale, tables)
    }

    /// Fallback locale
    pub fn default_locale(&self) -> &LocaleCode {
        &self.default_locale
    }

    /// Shipped locales in code order
    pub fn locales(&self) -> impl Iterator<Item = &LocaleCode> {
        self.tables.keys()
    }

    /// All tables in code order
    pub fn tables(&self) -> impl Iterator<Item = &LocaleTable> {
        self.tables.values().map(AsRef::as_ref)
    }

    /// Whether a locale is shipped
    pub fn contains(&self, locale: &str) -> bool {
        self.resolve(locale).is_ok()
    }

    fn resolve(&self, locale: &str) -> L10nResult<(&LocaleCode, &Arc<LocaleTable>)> {
        LocaleCode::parse(locale)
            .ok()
            .and_then(|code| self.tables.get_key_value(&code))
            .ok_or_else(|| L10nError::LocaleNotFound {
                code: locale.to_string(),
            })
    }

    /// The table of one locale
    pub fn table(&self, locale: &str) -> L10nResult<&LocaleTable> {
        self.resolve(locale).map(|(_, table)| table.as_ref())
    }

    /// A shared handle to one locale's table
    pub fn shared_table(&self, locale: &str) -> L10nResult<Arc<LocaleTable>> {
        self.resolve(locale).map(|(_, table)| Arc::clone(table))
    }

    /// Resolve a key, optionally scoped to one dictionary.
    ///
    /// Unscoped lookups search the user dictionary before the admin one.
    /// Keys missing from `locale` are taken from the default locale.
    pub fn lookup(&self, locale: &str, table: Option<TableKind>, key: &str) -> L10nResult<Lookup<'_>> {
        let (code, requested) = self.resolve(locale)?;

        fn find<'t>(t: &'t LocaleTable, table: Option<TableKind>, key: &str) -> Option<(TableKind, &'t str)> {
            match table {
                Some(kind) => t.get(kind, key).map(|value| (kind, value)),
                None => t.find(key),
            }
        }

        if let Some((kind, value)) = find(requested.as_ref(), table, key) {
            return Ok(Lookup {
                value,
                locale: code,
                table: kind,
                fell_back: false,
            });
        }

        let default_code = &self.default_locale;
        if code != default_code {
            if let Some((kind, value)) = find(self.fallback.as_ref(), table, key) {
                warn!(
                    "Key '{}' not found in locale {}, falling back to default locale {}",
                    key, code, default_code
                );
                return Ok(Lookup {
                    value,
                    locale: default_code,
                    table: kind,
                    fell_back: true,
                });
            }
        }

        Err(L10nError::key_not_found(key, code.as_str()))
    }

    /// Localized string for `key`, searching the user then the admin dictionary
    pub fn get(&self, locale: &str, key: &str) -> L10nResult<&str> {
        self.lookup(locale, None, key).map(|found| found.value)
    }

    /// Localized string for `key` within one dictionary
    pub fn get_in(&self, locale: &str, table: TableKind, key: &str) -> L10nResult<&str> {
        self.lookup(locale, Some(table), key).map(|found| found.value)
    }

    /// Like [`Catalog::get`] but never fails: unresolvable keys come back
    /// as the raw key so the interface stays usable.
    pub fn get_or_key<'a>(&'a self, locale: &str, key: &'a str) -> &'a str {
        self.get(locale, key).unwrap_or_else(|e| {
            debug!("Rendering raw key '{}' for locale {}: {}", key, locale, e);
            key
        })
    }

    /// Resolve `key` and fill its `$N` placeholders from `args`
    pub fn format<S: AsRef<str>>(&self, locale: &str, key: &str, args: &[S]) -> L10nResult<String> {
        self.get(locale, key).map(|template| substitute(template, args))
    }

    /// Whether `key` resolves for `locale`, directly or through fallback
    pub fn has_key(&self, locale: &str, key: &str) -> bool {
        self.lookup(locale, None, key).is_ok()
    }

    /// Pick the shipped locale that best serves a requested tag.
    ///
    /// Exact matches win, then a match on the language subtag
    /// (`es-MX` → `es`), otherwise the default locale.
    pub fn negotiate(&self, requested: &str) -> &LocaleCode {
        let Ok(code) = LocaleCode::parse(requested) else {
            debug!("Cannot negotiate unparsable tag '{}'", requested);
            return &self.default_locale;
        };

        if let Some((found, _)) = self.tables.get_key_value(&code) {
            return found;
        }
        if let Some((found, _)) = self.tables.get_key_value(&code.base()) {
            return found;
        }
        self.tables
            .keys()
            .find(|candidate| candidate.language() == code.language())
            .unwrap_or(&self.default_locale)
    }

    /// Month name for `month` in 1..=12
    pub fn month_name(&self, locale: &str, month: u32, style: MonthStyle) -> L10nResult<&str> {
        let index = usize::try_from(month)
            .ok()
            .and_then(|m| m.checked_sub(1))
            .filter(|&i| i < MONTH_COUNT)
            .ok_or(L10nError::IndexOutOfRange {
                what: "month",
                index: month as usize,
                len: MONTH_COUNT,
            })?;
        self.table(locale)?.month(index, style)
    }

    /// Weekday name for an index of the 0..=7 week array (0 and 7 = Sunday)
    pub fn weekday_name(&self, locale: &str, index: usize, style: WeekdayStyle) -> L10nResult<&str> {
        self.table(locale)?.weekday(index, style)
    }

    /// Day / hour / minute abbreviations
    pub fn dhm(&self, locale: &str) -> L10nResult<[&str; DHM_COUNT]> {
        self.table(locale)?.dhm()
    }
}
