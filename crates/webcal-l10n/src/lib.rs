//! Localization tables for the web calendar interface
//!
//! This crate loads the per-locale string tables of the calendar's admin
//! and user interfaces and provides:
//!
//! - Locale table loading with fallback to a default locale
//! - Calendar vocabulary (month and weekday names, day/hour/minute letters)
//! - Shape validation and completeness audits against a reference locale
//! - Transcoding between TOML, JSON, YAML and Fluent resources
//! - Positional `$N` placeholder utilities
//!
//! # Example
//!
//! ```rust
//! use webcal_l10n::{Catalog, MonthStyle};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let catalog = Catalog::shared();
//!
//! assert_eq!(catalog.get("es", "set_general_settings")?, "Calendario");
//! assert_eq!(catalog.month_name("it", 1, MonthStyle::Full)?, "Gennaio");
//!
//! // Keys the Romanian table lacks come from the default locale
//! assert!(catalog.lookup("ro", None, "hdr_view_1")?.fell_back);
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod audit;
pub mod bundled;
pub mod catalog;
pub mod error;
pub mod format;
pub mod ftl;
pub mod loader;
pub mod locale;
pub mod placeholder;
pub mod shape;
pub mod table;

pub use audit::{audit_catalog, audit_table, audit_tables, AuditPolicy, AuditReport, Finding, LocaleAudit};
pub use bundled::{bundled_tables, DEFAULT_LOCALE};
pub use catalog::{Catalog, Lookup};
pub use error::{L10nError, L10nResult};
pub use format::{decode, decode_named, encode, Format};
pub use ftl::{to_ftl, FluentExport};
pub use loader::LocaleLoader;
pub use locale::LocaleCode;
pub use placeholder::{markup_signature, markup_tags, placeholders, substitute};
pub use shape::{validate_shape, ShapeViolation};
pub use table::{
    CalendarVocabulary, Entries, LocaleMeta, LocaleTable, MonthStyle, TableKind, WeekdayStyle,
    DHM_COUNT, MONTH_COUNT, WEEKDAY_COUNT,
};
