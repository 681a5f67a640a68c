//! Positional placeholder tokens (`$1`, `$2`, …) and embedded markup

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::collections::BTreeSet;

pub(crate) static PLACEHOLDER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\$(\d+)").expect("Invalid placeholder regex pattern"));

static TAG_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"<\s*(/?)\s*([A-Za-z][A-Za-z0-9]*)[^>]*>").expect("Invalid markup regex pattern")
});

/// Positional indices referenced by `text`, e.g. `{1, 2}` for "$1 of $2"
pub fn placeholders(text: &str) -> BTreeSet<u32> {
    PLACEHOLDER_RE
        .captures_iter(text)
        .filter_map(|caps| caps[1].parse().ok())
        .collect()
}

/// Replace `$N` with `args[N - 1]`.
///
/// Tokens without a matching argument (including `$0`) are left intact so
/// the caller can substitute them later.
pub fn substitute<S: AsRef<str>>(template: &str, args: &[S]) -> String {
    PLACEHOLDER_RE
        .replace_all(template, |caps: &Captures<'_>| {
            caps[1]
                .parse::<usize>()
                .ok()
                .and_then(|n| n.checked_sub(1))
                .and_then(|i| args.get(i))
                .map_or_else(|| caps[0].to_string(), |arg| arg.as_ref().to_string())
        })
        .into_owned()
}

/// HTML tag tokens in document order, normalized to lower case.
/// Closing tags keep their slash: `"<b>x</b>"` → `["b", "/b"]`.
pub fn markup_tags(text: &str) -> Vec<String> {
    TAG_RE
        .captures_iter(text)
        .map(|caps| format!("{}{}", &caps[1], caps[2].to_ascii_lowercase()))
        .collect()
}

/// Sorted tag tokens, for order-insensitive comparison across translations
pub fn markup_signature(text: &str) -> Vec<String> {
    let mut tags = markup_tags(text);
    tags.sort();
    tags
}

/// Fluent variable name that stands in for placeholder `$index`
pub fn fluent_variable(index: u32) -> String {
    format!("arg{index}")
}
