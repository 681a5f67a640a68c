//! Completeness and consistency audit of locale tables against a reference

use crate::catalog::Catalog;
use crate::error::{L10nError, L10nResult};
use crate::locale::LocaleCode;
use crate::placeholder::{markup_signature, placeholders};
use crate::table::{LocaleTable, TableKind};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use tracing::{debug, info, warn};

/// Which findings make an audit fail
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditPolicy {
    /// Keys present in the reference but absent from a locale
    pub fail_on_missing: bool,
    /// `$N` tokens that differ from the reference value
    pub fail_on_placeholder_mismatch: bool,
    /// Record values that are identical to the reference
    pub report_untranslated: bool,
}

impl Default for AuditPolicy {
    fn default() -> Self {
        Self {
            fail_on_missing: false,
            fail_on_placeholder_mismatch: true,
            report_untranslated: true,
        }
    }
}

/// One discrepancy between a locale and the reference
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Finding {
    /// Key exists only in the reference
    Missing {
        /// Dictionary holding the key
        table: TableKind,
        /// Missing key
        key: String,
    },
    /// Key exists only in the locale
    Extra {
        /// Dictionary holding the key
        table: TableKind,
        /// Unexpected key
        key: String,
    },
    /// Value is byte-identical to the reference value
    Untranslated {
        /// Dictionary holding the key
        table: TableKind,
        /// Key whose value was copied
        key: String,
        /// The copied value
        value: String,
    },
    /// Placeholder set differs from the reference
    PlaceholderDrift {
        /// Dictionary holding the key
        table: TableKind,
        /// Affected key
        key: String,
        /// `$N` indices used by the reference
        expected: BTreeSet<u32>,
        /// `$N` indices used by the locale
        found: BTreeSet<u32>,
    },
    /// HTML tags differ from the reference
    MarkupDrift {
        /// Dictionary holding the key
        table: TableKind,
        /// Affected key
        key: String,
        /// Tag signature of the reference value
        expected: Vec<String>,
        /// Tag signature of the locale value
        found: Vec<String>,
    },
}

impl Finding {
    /// Dictionary the finding refers to
    pub fn table(&self) -> TableKind {
        match self {
            Self::Missing { table, .. }
            | Self::Extra { table, .. }
            | Self::Untranslated { table, .. }
            | Self::PlaceholderDrift { table, .. }
            | Self::MarkupDrift { table, .. } => *table,
        }
    }

    /// Key the finding refers to
    pub fn key(&self) -> &str {
        match self {
            Self::Missing { key, .. }
            | Self::Extra { key, .. }
            | Self::Untranslated { key, .. }
            | Self::PlaceholderDrift { key, .. }
            | Self::MarkupDrift { key, .. } => key,
        }
    }

    /// Whether `policy` treats this finding as a failure
    pub fn is_failure(&self, policy: &AuditPolicy) -> bool {
        match self {
            Self::Missing { .. } => policy.fail_on_missing,
            Self::PlaceholderDrift { .. } => policy.fail_on_placeholder_mismatch,
            Self::Extra { .. } | Self::Untranslated { .. } | Self::MarkupDrift { .. } => false,
        }
    }
}

fn join(set: &BTreeSet<u32>) -> String {
    set.iter().map(|n| format!("${n}")).collect::<Vec<_>>().join(" ")
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing { table, key } => write!(f, "missing {table}.{key}"),
            Self::Extra { table, key } => write!(f, "extra {table}.{key}"),
            Self::Untranslated { table, key, value } => {
                write!(f, "untranslated {table}.{key} = {value:?}")
            }
            Self::PlaceholderDrift {
                table,
                key,
                expected,
                found,
            } => write!(
                f,
                "placeholders of {table}.{key} are [{}], expected [{}]",
                join(found),
                join(expected)
            ),
            Self::MarkupDrift {
                table,
                key,
                expected,
                found,
            } => write!(
                f,
                "markup of {table}.{key} is [{}], expected [{}]",
                found.join(" "),
                expected.join(" ")
            ),
        }
    }
}

/// Audit result for one locale
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LocaleAudit {
    /// Audited locale
    pub code: LocaleCode,
    /// Its display name
    pub name: String,
    /// Keys in the reference, both dictionaries
    pub reference_keys: usize,
    /// Reference keys the locale defines
    pub present_keys: usize,
    /// `present_keys / reference_keys`, 1.0 for an empty reference
    pub coverage: f64,
    /// Discrepancies in dictionary order
    pub findings: Vec<Finding>,
}

impl LocaleAudit {
    /// Keys the locale lacks
    pub fn missing(&self) -> impl Iterator<Item = &Finding> {
        self.findings
            .iter()
            .filter(|f| matches!(f, Finding::Missing { .. }))
    }

    /// Values copied verbatim from the reference
    pub fn untranslated(&self) -> impl Iterator<Item = &Finding> {
        self.findings
            .iter()
            .filter(|f| matches!(f, Finding::Untranslated { .. }))
    }

    /// Whether the locale lacks `key` in `table`
    pub fn is_missing(&self, table: TableKind, key: &str) -> bool {
        self.missing().any(|f| f.table() == table && f.key() == key)
    }

    /// Findings that fail under `policy`
    pub fn failures<'a>(&'a self, policy: &'a AuditPolicy) -> impl Iterator<Item = &'a Finding> + 'a {
        self.findings.iter().filter(move |f| f.is_failure(policy))
    }

    /// Whether every reference key is present
    pub fn is_complete(&self) -> bool {
        self.present_keys == self.reference_keys
    }
}

/// Audit of every locale against one reference locale
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuditReport {
    /// Locale the others were compared with
    pub reference: LocaleCode,
    /// One entry per audited locale, in code order
    pub locales: Vec<LocaleAudit>,
}

impl AuditReport {
    /// Result for one locale
    pub fn locale(&self, code: &str) -> Option<&LocaleAudit> {
        self.locales.iter().find(|audit| audit.code.as_str() == code)
    }

    /// Number of findings that fail under `policy`
    pub fn failure_count(&self, policy: &AuditPolicy) -> usize {
        self.locales
            .iter()
            .map(|audit| audit.failures(policy).count())
            .sum()
    }

    /// Whether no finding fails under `policy`
    pub fn passes(&self, policy: &AuditPolicy) -> bool {
        self.failure_count(policy) == 0
    }

    /// Pretty-printed JSON rendition
    pub fn to_json(&self) -> L10nResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| L10nError::Serialize {
            format: "JSON",
            message: e.to_string(),
        })
    }
}

/// Compare one table with the reference
pub fn audit_table(reference: &LocaleTable, table: &LocaleTable, policy: &AuditPolicy) -> LocaleAudit {
    let mut findings = Vec::new();
    let mut present_keys = 0;

    for kind in [TableKind::Admin, TableKind::User] {
        let expected = reference.entries(kind);
        let actual = table.entries(kind);

        for (key, reference_value) in expected {
            let Some(value) = actual.get(key) else {
                findings.push(Finding::Missing {
                    table: kind,
                    key: key.clone(),
                });
                continue;
            };
            present_keys += 1;

            if policy.report_untranslated && is_passthrough(reference_value, value) {
                findings.push(Finding::Untranslated {
                    table: kind,
                    key: key.clone(),
                    value: value.clone(),
                });
            }

            let expected_tokens = placeholders(reference_value);
            let found_tokens = placeholders(value);
            if expected_tokens != found_tokens {
                findings.push(Finding::PlaceholderDrift {
                    table: kind,
                    key: key.clone(),
                    expected: expected_tokens,
                    found: found_tokens,
                });
            }

            let expected_tags = markup_signature(reference_value);
            let found_tags = markup_signature(value);
            if expected_tags != found_tags {
                findings.push(Finding::MarkupDrift {
                    table: kind,
                    key: key.clone(),
                    expected: expected_tags,
                    found: found_tags,
                });
            }
        }

        findings.extend(
            actual
                .keys()
                .filter(|key| !expected.contains_key(*key))
                .map(|key| Finding::Extra {
                    table: kind,
                    key: key.clone(),
                }),
        );
    }

    let reference_keys = reference.key_count();
    let coverage = if reference_keys == 0 {
        1.0
    } else {
        present_keys as f64 / reference_keys as f64
    };

    let audit = LocaleAudit {
        code: table.code().clone(),
        name: table.name().to_string(),
        reference_keys,
        present_keys,
        coverage,
        findings,
    };

    let untranslated = audit.untranslated().count();
    if untranslated > 0 {
        warn!(
            "Locale {} has {} values identical to {}",
            audit.code,
            untranslated,
            reference.code()
        );
    }
    debug!(
        "Audited {}: {:.1}% coverage, {} findings",
        audit.code,
        audit.coverage * 100.0,
        audit.findings.len()
    );
    audit
}

// Values with three letters or fewer ("no", "OK") are not reported.
fn is_passthrough(reference: &str, value: &str) -> bool {
    reference == value && value.chars().filter(|c| c.is_alphabetic()).count() > 3
}

/// Audit every table except the reference itself
pub fn audit_tables<'a, I>(reference: &LocaleTable, tables: I, policy: &AuditPolicy) -> AuditReport
where
    I: IntoIterator<Item = &'a LocaleTable>,
{
    let mut locales: Vec<LocaleAudit> = tables
        .into_iter()
        .filter(|table| table.code() != reference.code())
        .map(|table| audit_table(reference, table, policy))
        .collect();
    locales.sort_by(|a, b| a.code.cmp(&b.code));

    info!(
        "Audited {} locales against {}",
        locales.len(),
        reference.code()
    );
    AuditReport {
        reference: reference.code().clone(),
        locales,
    }
}

/// Audit a catalog against one of its locales
pub fn audit_catalog(catalog: &Catalog, reference: &str, policy: &AuditPolicy) -> L10nResult<AuditReport> {
    let reference = catalog.table(reference)?;
    Ok(audit_tables(reference, catalog.tables(), policy))
}
