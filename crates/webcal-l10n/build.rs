//! Build script for webcal-l10n
//!
//! Validates the shipped locale tables at compile time:
//! - every file is well-formed TOML with `meta.code` matching its name
//! - `meta.name` and every calendar entry are non-blank
//! - calendar arrays have their fixed lengths and the week wraps around
//! - keys missing relative to the reference locale are reported as warnings

use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use toml::{Table, Value};

const REFERENCE_LOCALE: &str = "en";

const ARRAYS: [(&str, usize); 7] = [
    ("months", 12),
    ("months_m", 12),
    ("wkDays", 8),
    ("wkDays_l", 8),
    ("wkDays_m", 8),
    ("wkDays_s", 8),
    ("dhm", 3),
];

/// Keys of the admin and user dictionaries of one locale
type KeySets = BTreeMap<&'static str, Vec<String>>;

fn locales_dir() -> Result<PathBuf, String> {
    let manifest_dir = env::var("CARGO_MANIFEST_DIR").map_err(|_| "CARGO_MANIFEST_DIR not set")?;
    let dir = Path::new(&manifest_dir).join("../../locales");
    if !dir.exists() {
        return Err(format!("Locales directory not found: {}", dir.display()));
    }
    Ok(dir)
}

fn string_array<'a>(calendar: &'a Table, name: &str) -> Result<Vec<&'a str>, String> {
    let values = calendar
        .get(name)
        .and_then(Value::as_array)
        .ok_or_else(|| format!("calendar.{name} is missing or not an array"))?;
    values
        .iter()
        .map(|v| v.as_str().ok_or_else(|| format!("calendar.{name} holds a non-string value")))
        .collect()
}

fn section_keys(doc: &Table, name: &'static str) -> Result<Vec<String>, String> {
    match doc.get(name) {
        None => Ok(Vec::new()),
        Some(Value::Table(table)) => {
            for (key, value) in table {
                if !value.is_str() {
                    return Err(format!("{name}.{key} is not a string"));
                }
            }
            Ok(table.keys().cloned().collect())
        }
        Some(_) => Err(format!("[{name}] is not a table")),
    }
}

/// Validate a single locale file, returning its dictionary keys
fn validate_locale_file(path: &Path, code: &str) -> Result<KeySets, String> {
    let content = fs::read_to_string(path).map_err(|e| format!("failed to read: {e}"))?;
    let doc: Table = content.parse().map_err(|e| format!("invalid TOML: {e}"))?;

    let declared = doc
        .get("meta")
        .and_then(|meta| meta.get("code"))
        .and_then(Value::as_str)
        .ok_or("meta.code is missing")?;
    if declared != code {
        return Err(format!("meta.code is '{declared}' but the file is named {code}.toml"));
    }

    let calendar = doc
        .get("calendar")
        .and_then(Value::as_table)
        .ok_or("[calendar] is missing")?;

    let mut problems = Vec::new();
    let display_name = doc
        .get("meta")
        .and_then(|meta| meta.get("name"))
        .and_then(Value::as_str)
        .unwrap_or_default();
    if display_name.trim().is_empty() {
        problems.push("meta.name is empty".to_string());
    }

    for (name, expected) in ARRAYS {
        let values = string_array(calendar, name)?;
        for (index, value) in values.iter().enumerate() {
            if value.trim().is_empty() {
                problems.push(format!("calendar.{name}[{index}] is blank"));
            }
        }
        if values.len() != expected {
            problems.push(format!("calendar.{name} has {} entries, expected {expected}", values.len()));
        } else if name.starts_with("wkDays") && values[0] != values[7] {
            problems.push(format!(
                "calendar.{name}[0] is '{}' but [7] is '{}'",
                values[0], values[7]
            ));
        }
    }
    if !problems.is_empty() {
        return Err(problems.join("; "));
    }

    let mut keys = KeySets::new();
    keys.insert("admin", section_keys(&doc, "admin")?);
    keys.insert("user", section_keys(&doc, "user")?);
    Ok(keys)
}

fn validate_locales() -> Result<(), String> {
    println!("cargo:rerun-if-changed=../../locales");

    let dir = locales_dir()?;
    let mut all_keys = BTreeMap::new();
    let mut errors = Vec::new();

    let entries = fs::read_dir(&dir).map_err(|e| format!("Failed to read locales directory: {e}"))?;
    for entry in entries {
        let path = entry.map_err(|e| format!("Failed to read directory entry: {e}"))?.path();
        if path.extension().and_then(|e| e.to_str()) != Some("toml") {
            continue;
        }
        let code = path
            .file_stem()
            .and_then(|s| s.to_str())
            .ok_or_else(|| format!("Invalid locale file name: {}", path.display()))?
            .to_string();

        match validate_locale_file(&path, &code) {
            Ok(keys) => {
                all_keys.insert(code, keys);
            }
            Err(e) => errors.push(format!("{code}: {e}")),
        }
    }

    if !errors.is_empty() {
        return Err(format!("Validation errors:\n{}", errors.join("\n")));
    }

    let reference = all_keys
        .get(REFERENCE_LOCALE)
        .ok_or_else(|| format!("Reference locale {REFERENCE_LOCALE}.toml not found"))?;

    for (code, keys) in &all_keys {
        if code == REFERENCE_LOCALE {
            continue;
        }
        for (section, reference_keys) in reference {
            let present = keys.get(section).map(Vec::as_slice).unwrap_or_default();
            let missing: Vec<&str> = reference_keys
                .iter()
                .filter(|key| !present.contains(*key))
                .map(String::as_str)
                .collect();
            if !missing.is_empty() {
                println!(
                    "cargo:warning={code}: {} {section} keys fall back to {REFERENCE_LOCALE}: {}",
                    missing.len(),
                    missing.join(", ")
                );
            }
        }
    }

    Ok(())
}

fn main() {
    if let Err(e) = validate_locales() {
        eprintln!("Locale validation failed:\n{e}");
        process::exit(1);
    }
}
