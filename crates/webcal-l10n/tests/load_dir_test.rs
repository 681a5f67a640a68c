//! Loading locale tables from a directory on disk

use std::fs;
use webcal_common::test_utils::{create_temp_dir, init_test_logging, write_fixture};
use webcal_l10n::{encode, Catalog, Format, L10nError, LocaleCode, LocaleLoader};

fn locale_source(code: &str, extra: &str) -> String {
    format!(
        r#"[meta]
code = "{code}"
name = "Test {code}"

[calendar]
months = ["1", "2", "3", "4", "5", "6", "7", "8", "9", "10", "11", "12"]
months_m = ["1", "2", "3", "4", "5", "6", "7", "8", "9", "10", "11", "12"]
wkDays = ["Su", "Mo", "Tu", "We", "Th", "Fr", "Sa", "Su"]
wkDays_l = ["Su", "Mo", "Tu", "We", "Th", "Fr", "Sa", "Su"]
wkDays_m = ["Su", "Mo", "Tu", "We", "Th", "Fr", "Sa", "Su"]
wkDays_s = ["S", "M", "T", "W", "T", "F", "S", "S"]
dhm = ["d", "h", "m"]

[admin]
yes = "yes-{code}"
{extra}
"#
    )
}

fn en() -> LocaleCode {
    LocaleCode::parse("en").unwrap()
}

#[test]
fn test_load_directory() {
    init_test_logging();
    let dir = create_temp_dir();
    write_fixture(dir.path(), "en.toml", &locale_source("en", "only_en = \"fallback\""));
    write_fixture(dir.path(), "ro.toml", &locale_source("ro", ""));
    write_fixture(dir.path(), "README.md", "not a locale");
    write_fixture(dir.path(), "notes.txt", "ignored");

    let catalog = Catalog::load_dir(dir.path(), en()).unwrap();
    assert_eq!(catalog.locales().count(), 2);
    assert_eq!(catalog.get("ro", "yes").unwrap(), "yes-ro");
    assert_eq!(catalog.get("ro", "only_en").unwrap(), "fallback");
}

#[test]
fn test_json_and_yaml_files_are_loaded() {
    let dir = create_temp_dir();
    write_fixture(dir.path(), "en.toml", &locale_source("en", ""));

    let nl = webcal_l10n::decode(&locale_source("nl", ""), Format::Toml).unwrap();
    write_fixture(dir.path(), "nl.json", &encode(&nl, Format::Json).unwrap());
    let pl = webcal_l10n::decode(&locale_source("pl", ""), Format::Toml).unwrap();
    write_fixture(dir.path(), "pl.yml", &encode(&pl, Format::Yaml).unwrap());

    let catalog = Catalog::load_dir(dir.path(), en()).unwrap();
    assert_eq!(catalog.get("nl", "yes").unwrap(), "yes-nl");
    assert_eq!(catalog.get("pl", "yes").unwrap(), "yes-pl");
}

#[test]
fn test_code_must_match_file_name() {
    let dir = create_temp_dir();
    write_fixture(dir.path(), "en.toml", &locale_source("en", ""));
    write_fixture(dir.path(), "es.toml", &locale_source("it", ""));

    match Catalog::load_dir(dir.path(), en()) {
        Err(L10nError::CodeMismatch { expected, found, .. }) => {
            assert_eq!(expected, "es");
            assert_eq!(found, "it");
        }
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn test_malformed_files_are_rejected() {
    let dir = create_temp_dir();
    write_fixture(dir.path(), "en.toml", &locale_source("en", ""));
    write_fixture(dir.path(), "pl.toml", "[meta\ncode = ");
    assert!(matches!(
        Catalog::load_dir(dir.path(), en()),
        Err(L10nError::Parse { .. })
    ));

    let broken = locale_source("pl", "").replace(r#"dhm = ["d", "h", "m"]"#, r#"dhm = ["d", "h"]"#);
    write_fixture(dir.path(), "pl.toml", &broken);
    match Catalog::load_dir(dir.path(), en()) {
        Err(L10nError::Shape { code, violations }) => {
            assert_eq!(code, "pl");
            assert_eq!(violations.len(), 1);
        }
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn test_duplicate_locale_across_formats() {
    let dir = create_temp_dir();
    write_fixture(dir.path(), "en.toml", &locale_source("en", ""));
    let es = webcal_l10n::decode(&locale_source("es", ""), Format::Toml).unwrap();
    write_fixture(dir.path(), "es.toml", &encode(&es, Format::Toml).unwrap());
    write_fixture(dir.path(), "es.json", &encode(&es, Format::Json).unwrap());

    assert!(matches!(
        Catalog::load_dir(dir.path(), en()),
        Err(L10nError::DuplicateLocale(code)) if code == "es"
    ));
}

#[test]
fn test_missing_default_locale() {
    let dir = create_temp_dir();
    write_fixture(dir.path(), "ro.toml", &locale_source("ro", ""));
    assert!(matches!(
        Catalog::load_dir(dir.path(), en()),
        Err(L10nError::LocaleNotFound { code }) if code == "en"
    ));
}

#[test]
fn test_loader_single_locale() {
    let dir = create_temp_dir();
    write_fixture(dir.path(), "it.toml", &locale_source("it", ""));
    let loader = LocaleLoader::new(dir.path());

    let it = loader.load_locale(&LocaleCode::parse("it").unwrap()).unwrap();
    assert_eq!(it.name(), "Test it");
    assert!(matches!(
        loader.load_locale(&LocaleCode::parse("fr").unwrap()),
        Err(L10nError::LocaleNotFound { .. })
    ));
    assert!(Catalog::load_dir(dir.path().join("absent"), en()).is_err());
    fs::remove_file(dir.path().join("it.toml")).unwrap();
    assert!(loader.discover().unwrap().is_empty());
}
