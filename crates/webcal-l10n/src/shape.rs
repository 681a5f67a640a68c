//! Structural checks on a single locale table

use crate::table::{LocaleTable, DHM_COUNT, MONTH_COUNT, WEEKDAY_COUNT};
use serde::Serialize;
use std::fmt;

/// A way in which a table's fixed-shape data is malformed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ShapeViolation {
    /// Array has the wrong number of elements
    WrongLength {
        /// Array name as written in the file
        array: &'static str,
        /// Required element count
        expected: usize,
        /// Actual element count
        found: usize,
    },
    /// Weekday array does not repeat Sunday at index 7
    WeekWraparound {
        /// Array name as written in the file
        array: &'static str,
        /// Element 0
        first: String,
        /// Element 7
        last: String,
    },
    /// Vocabulary element is empty or whitespace
    BlankEntry {
        /// Array name as written in the file
        array: &'static str,
        /// Offending index
        index: usize,
    },
    /// `meta.name` is empty
    MissingName,
}

impl fmt::Display for ShapeViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WrongLength { array, expected, found } => {
                write!(f, "{array} has {found} elements, expected {expected}")
            }
            Self::WeekWraparound { array, first, last } => {
                write!(f, "{array}[0] is '{first}' but {array}[7] is '{last}'")
            }
            Self::BlankEntry { array, index } => write!(f, "{array}[{index}] is blank"),
            Self::MissingName => f.write_str("meta.name is empty"),
        }
    }
}

fn expected_len(array: &str) -> usize {
    match array {
        "months" | "months_m" => MONTH_COUNT,
        "dhm" => DHM_COUNT,
        _ => WEEKDAY_COUNT,
    }
}

/// Check the calendar vocabulary and metadata of a table.
///
/// Returns every violation found; an empty vector means the table is
/// well-formed.
pub fn validate_shape(table: &LocaleTable) -> Vec<ShapeViolation> {
    let mut violations = Vec::new();

    if table.meta.name.trim().is_empty() {
        violations.push(ShapeViolation::MissingName);
    }

    for (array, values) in table.calendar.arrays() {
        let expected = expected_len(array);
        if values.len() != expected {
            violations.push(ShapeViolation::WrongLength {
                array,
                expected,
                found: values.len(),
            });
        }

        for (index, value) in values.iter().enumerate() {
            if value.trim().is_empty() {
                violations.push(ShapeViolation::BlankEntry { array, index });
            }
        }

        if array.starts_with("wkDays") && values.len() == WEEKDAY_COUNT && values[0] != values[7] {
            violations.push(ShapeViolation::WeekWraparound {
                array,
                first: values[0].clone(),
                last: values[7].clone(),
            });
        }
    }

    violations
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::{decode, Format};

    const VALID: &str = r#"
[meta]
code = "xx"
name = "Test"

[calendar]
months = ["1", "2", "3", "4", "5", "6", "7", "8", "9", "10", "11", "12"]
months_m = ["1", "2", "3", "4", "5", "6", "7", "8", "9", "10", "11", "12"]
wkDays = ["Su", "Mo", "Tu", "We", "Th", "Fr", "Sa", "Su"]
wkDays_l = ["Su", "Mo", "Tu", "We", "Th", "Fr", "Sa", "Su"]
wkDays_m = ["Su", "Mo", "Tu", "We", "Th", "Fr", "Sa", "Su"]
wkDays_s = ["S", "M", "T", "W", "T", "F", "S", "S"]
dhm = ["d", "h", "m"]
"#;

    fn valid_table() -> LocaleTable {
        decode(VALID, Format::Toml).unwrap()
    }

    #[test]
    fn test_valid_table_has_no_violations() {
        assert!(validate_shape(&valid_table()).is_empty());
    }

    #[test]
    fn test_wrong_lengths_reported() {
        let mut table = valid_table();
        table.calendar.months.pop();
        table.calendar.dhm.push("s".to_string());

        let violations = validate_shape(&table);
        assert!(violations.contains(&ShapeViolation::WrongLength {
            array: "months",
            expected: 12,
            found: 11
        }));
        assert!(violations.contains(&ShapeViolation::WrongLength {
            array: "dhm",
            expected: 3,
            found: 4
        }));
        assert_eq!(violations.len(), 2);
    }

    #[test]
    fn test_week_wraparound_reported() {
        let mut table = valid_table();
        table.calendar.weekdays_short[7] = "Mo".to_string();

        let violations = validate_shape(&table);
        assert_eq!(
            violations,
            vec![ShapeViolation::WeekWraparound {
                array: "wkDays_m",
                first: "Su".to_string(),
                last: "Mo".to_string(),
            }]
        );
        assert_eq!(violations[0].to_string(), "wkDays_m[0] is 'Su' but wkDays_m[7] is 'Mo'");
    }

    #[test]
    fn test_blank_entries_and_name() {
        let mut table = valid_table();
        table.meta.name = "  ".to_string();
        table.calendar.months_short[3] = String::new();

        let violations = validate_shape(&table);
        assert!(violations.contains(&ShapeViolation::MissingName));
        assert!(violations.contains(&ShapeViolation::BlankEntry { array: "months_m", index: 3 }));
    }
}
