//! Completeness audit of the shipped locales against English

use webcal_l10n::{audit_catalog, AuditPolicy, Catalog, Finding, TableKind};

fn report() -> webcal_l10n::AuditReport {
    audit_catalog(Catalog::shared(), "en", &AuditPolicy::default()).unwrap()
}

fn untranslated_keys(report: &webcal_l10n::AuditReport, code: &str) -> Vec<String> {
    report
        .locale(code)
        .unwrap()
        .untranslated()
        .map(|f| f.key().to_string())
        .collect()
}

#[test]
fn test_reference_is_not_audited() {
    let report = report();
    assert_eq!(report.reference.as_str(), "en");
    assert!(report.locale("en").is_none());
    assert_eq!(report.locales.len(), 5);
}

#[test]
fn test_romanian_snapshot_is_incomplete() {
    let report = report();
    let ro = report.locale("ro").unwrap();

    assert!(!ro.is_complete());
    assert!(ro.is_missing(TableKind::User, "hdr_view_1"));
    assert!(ro.is_missing(TableKind::User, "evt_until"));
    assert!(ro.is_missing(TableKind::Admin, "mdb_backup_done"));
    assert_eq!(ro.missing().count(), 3);
    assert!(ro.coverage < 1.0);
}

#[test]
fn test_other_locales_are_complete() {
    let report = report();
    for code in ["es", "it", "nl", "pl"] {
        let audit = report.locale(code).unwrap();
        assert!(audit.is_complete(), "{code} is missing keys");
        assert_eq!(audit.coverage, 1.0);
    }
}

#[test]
fn test_english_passthroughs_detected() {
    let report = report();

    let pl = untranslated_keys(&report, "pl");
    assert!(pl.contains(&"mdb_upgraded".to_string()));
    assert!(pl.contains(&"notif_sms_sent".to_string()));

    let ro = untranslated_keys(&report, "ro");
    assert!(ro.contains(&"iex_export_csv".to_string()));
    assert!(ro.contains(&"help_repeat".to_string()));

    assert!(untranslated_keys(&report, "es").is_empty());
}

#[test]
fn test_shipped_placeholders_and_markup_agree() {
    let report = report();
    for audit in &report.locales {
        for finding in &audit.findings {
            assert!(
                !matches!(
                    finding,
                    Finding::PlaceholderDrift { .. } | Finding::MarkupDrift { .. } | Finding::Extra { .. }
                ),
                "{}: {}",
                audit.code,
                finding
            );
        }
    }
    assert!(report.passes(&AuditPolicy::default()));
}

#[test]
fn test_missing_keys_fail_strict_policy() {
    let strict = AuditPolicy {
        fail_on_missing: true,
        ..AuditPolicy::default()
    };
    let report = audit_catalog(Catalog::shared(), "en", &strict).unwrap();
    assert!(!report.passes(&strict));
    assert_eq!(report.failure_count(&strict), 3);
}

#[test]
fn test_unknown_reference_locale() {
    assert!(audit_catalog(Catalog::shared(), "fr", &AuditPolicy::default()).is_err());
}
