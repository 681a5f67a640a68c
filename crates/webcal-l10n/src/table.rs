//! Locale table data model

use crate::error::{L10nError, L10nResult};
use crate::locale::LocaleCode;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Ordered key → localized string mapping. Document order is preserved so
/// that re-serializing a table reproduces its document key order.
pub type Entries = IndexMap<String, String>;

/// Number of entries in `months` and `months_m`
pub const MONTH_COUNT: usize = 12;
/// Number of entries in each `wkDays*` array (Sunday at both ends)
pub const WEEKDAY_COUNT: usize = 8;
/// Number of entries in `dhm`
pub const DHM_COUNT: usize = 3;

/// Which of the two flat dictionaries a key lives in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TableKind {
    /// Administration interface labels and help text
    Admin,
    /// End-user interface labels
    User,
}

impl TableKind {
    /// Both kinds, in lookup order for unscoped queries
    pub const LOOKUP_ORDER: [TableKind; 2] = [TableKind::User, TableKind::Admin];

    /// Section name used in locale files
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::User => "user",
        }
    }
}

impl fmt::Display for TableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Month name width
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonthStyle {
    /// `months`: "Enero"
    Full,
    /// `months_m`: "Ene"
    Abbreviated,
}

/// Weekday name width
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeekdayStyle {
    /// `wkDays`: "Domingo"
    Full,
    /// `wkDays_l`: "Dom"
    Abbreviated,
    /// `wkDays_m`: "Do"
    Short,
    /// `wkDays_s`: "D"
    Initial,
}

/// Identification block of a locale file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LocaleMeta {
    /// Language code; must match the file stem
    pub code: LocaleCode,
    /// Native display name, e.g. "Español"
    pub name: String,
}

/// Fixed-shape calendar date vocabulary
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CalendarVocabulary {
    /// Full month names, January first
    pub months: Vec<String>,
    /// Abbreviated month names
    #[serde(rename = "months_m")]
    pub months_short: Vec<String>,
    /// Full weekday names, Sunday at index 0 and 7
    #[serde(rename = "wkDays")]
    pub weekdays: Vec<String>,
    /// Three-letter weekday names
    #[serde(rename = "wkDays_l")]
    pub weekdays_abbr: Vec<String>,
    /// Two-letter weekday names
    #[serde(rename = "wkDays_m")]
    pub weekdays_short: Vec<String>,
    /// Single-letter weekday names
    #[serde(rename = "wkDays_s")]
    pub weekdays_initial: Vec<String>,
    /// Day / hour / minute abbreviations
    pub dhm: Vec<String>,
}

impl CalendarVocabulary {
    /// Month array for a style
    pub fn months(&self, style: MonthStyle) -> &[String] {
        match style {
            MonthStyle::Full => &self.months,
            MonthStyle::Abbreviated => &self.months_short,
        }
    }

    /// Weekday array for a style
    pub fn weekdays(&self, style: WeekdayStyle) -> &[String] {
        match style {
            WeekdayStyle::Full => &self.weekdays,
            WeekdayStyle::Abbreviated => &self.weekdays_abbr,
            WeekdayStyle::Short => &self.weekdays_short,
            WeekdayStyle::Initial => &self.weekdays_initial,
        }
    }

    /// All arrays with their file names, in file order
    pub fn arrays(&self) -> [(&'static str, &[String]); 7] {
        [
            ("months", &self.months),
            ("months_m", &self.months_short),
            ("wkDays", &self.weekdays),
            ("wkDays_l", &self.weekdays_abbr),
            ("wkDays_m", &self.weekdays_short),
            ("wkDays_s", &self.weekdays_initial),
            ("dhm", &self.dhm),
        ]
    }
}

/// One locale's complete string table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LocaleTable {
    /// Identification
    pub meta: LocaleMeta,
    /// Month and weekday names
    pub calendar: CalendarVocabulary,
    /// Admin interface strings
    #[serde(default)]
    pub admin: Entries,
    /// User interface strings
    #[serde(default)]
    pub user: Entries,
}

impl LocaleTable {
    /// Locale code declared in the table
    pub fn code(&self) -> &LocaleCode {
        &self.meta.code
    }

    /// Native display name
    pub fn name(&self) -> &str {
        &self.meta.name
    }

    /// Entries of one dictionary
    pub fn entries(&self, kind: TableKind) -> &Entries {
        match kind {
            TableKind::Admin => &self.admin,
            TableKind::User => &self.user,
        }
    }

    /// Look up a key in one dictionary
    pub fn get(&self, kind: TableKind, key: &str) -> Option<&str> {
        self.entries(kind).get(key).map(String::as_str)
    }

    /// Look up a key in the user dictionary, then the admin one
    pub fn find(&self, key: &str) -> Option<(TableKind, &str)> {
        TableKind::LOOKUP_ORDER
            .into_iter()
            .find_map(|kind| self.get(kind, key).map(|value| (kind, value)))
    }

    /// Total number of keys across both dictionaries
    pub fn key_count(&self) -> usize {
        self.admin.len() + self.user.len()
    }

    /// Month name for a zero-based index (0 = January)
    pub fn month(&self, index: usize, style: MonthStyle) -> L10nResult<&str> {
        let months = self.calendar.months(style);
        months
            .get(index)
            .map(String::as_str)
            .ok_or(L10nError::IndexOutOfRange {
                what: match style {
                    MonthStyle::Full => "months",
                    MonthStyle::Abbreviated => "months_m",
                },
                index,
                len: months.len(),
            })
    }

    /// Weekday name for an index in the 0..=7 week array (0 and 7 = Sunday)
    pub fn weekday(&self, index: usize, style: WeekdayStyle) -> L10nResult<&str> {
        let days = self.calendar.weekdays(style);
        days.get(index)
            .map(String::as_str)
            .ok_or(L10nError::IndexOutOfRange {
                what: match style {
                    WeekdayStyle::Full => "wkDays",
                    WeekdayStyle::Abbreviated => "wkDays_l",
                    WeekdayStyle::Short => "wkDays_m",
                    WeekdayStyle::Initial => "wkDays_s",
                },
                index,
                len: days.len(),
            })
    }

    /// Day, hour and minute abbreviations
    pub fn dhm(&self) -> L10nResult<[&str; DHM_COUNT]> {
        match self.calendar.dhm.as_slice() {
            [d, h, m] => Ok([d.as_str(), h.as_str(), m.as_str()]),
            other => Err(L10nError::IndexOutOfRange {
                what: "dhm",
                index: DHM_COUNT - 1,
                len: other.len(),
            }),
        }
    }
}
