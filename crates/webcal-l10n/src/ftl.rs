//! Fluent (`.ftl`) export
//!
//! Every dictionary entry becomes a message named `admin-<key>` or
//! `user-<key>`, and every calendar vocabulary element becomes
//! `calendar-<array>-<index>`. Positional placeholders are rewritten as
//! Fluent variables (`$1` → `{ $arg1 }`) so a `FluentBundle` can fill them
//! from `FluentArgs`. Literal braces, leading/trailing whitespace and
//! blank lines are escaped as string literals so the formatted output
//! reproduces the source value.

use crate::error::{L10nError, L10nResult};
use crate::locale::LocaleCode;
use crate::placeholder::{fluent_variable, PLACEHOLDER_RE};
use crate::table::{LocaleTable, TableKind};
use fluent::{FluentArgs, FluentResource, FluentValue};
use fluent_bundle::concurrent::FluentBundle;
use fluent_syntax::ast::{Entry, Expression, InlineExpression, Pattern, PatternElement};
use fluent_syntax::parser::parse;
use std::collections::{BTreeSet, HashMap};
use std::fmt::Write as _;
use tracing::{debug, warn};

/// Fluent message identifier for a dictionary entry
pub fn message_id(kind: TableKind, key: &str) -> String {
    format!("{}-{}", kind.as_str(), sanitize_identifier(key))
}

/// Fluent message identifier for a calendar vocabulary element
pub fn calendar_message_id(array: &str, index: usize) -> String {
    format!("calendar-{}-{index}", sanitize_identifier(array))
}

fn sanitize_identifier(key: &str) -> String {
    key.chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect()
}

fn string_literal(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            c if c.is_control() => {
                let _ = write!(escaped, "\\u{:04X}", u32::from(c));
            }
            c => escaped.push(c),
        }
    }
    format!("{{\"{escaped}\"}}")
}

/// Escape braces and rewrite placeholders within one line of text
fn escape_inline(text: &str, out: &mut String) {
    let mut last = 0;
    for whole in PLACEHOLDER_RE.find_iter(text) {
        escape_braces(&text[last..whole.start()], out);
        match whole.as_str()[1..].parse::<u32>() {
            Ok(index) => {
                let _ = write!(out, "{{ ${} }}", fluent_variable(index));
            }
            Err(_) => escape_braces(whole.as_str(), out),
        }
        last = whole.end();
    }
    escape_braces(&text[last..], out);
}

fn escape_braces(text: &str, out: &mut String) {
    for c in text.chars() {
        match c {
            '{' => out.push_str("{\"{\"}"),
            '}' => out.push_str("{\"}\"}"),
            c if c.is_control() && c != '\t' => out.push_str(&string_literal(&c.to_string())),
            _ => out.push(c),
        }
    }
}

/// Render one line so that Fluent's whitespace handling and line-start
/// syntax (`[`, `*`, `.`) cannot alter it
fn escape_line(line: &str, continuation: bool) -> String {
    if line.is_empty() {
        return string_literal("");
    }

    let body = line.trim_start();
    let leading = &line[..line.len() - body.len()];
    let trimmed = body.trim_end();
    let trailing = &body[trimmed.len()..];

    let mut out = String::new();
    if !leading.is_empty() {
        out.push_str(&string_literal(leading));
    }

    let mut rest = trimmed;
    if continuation && leading.is_empty() {
        if let Some(first) = rest.chars().next().filter(|c| matches!(c, '[' | '*' | '.')) {
            out.push_str(&string_literal(&first.to_string()));
            rest = &rest[first.len_utf8()..];
        }
    }
    escape_inline(rest, &mut out);

    if !trailing.is_empty() {
        out.push_str(&string_literal(trailing));
    }
    out
}

/// Render a value as the right-hand side of a Fluent message.
///
/// Line breaks become continuation lines; a `\r` before them is kept as
/// a `\u000D` literal so CRLF values format back unchanged.
pub fn escape_pattern(value: &str) -> String {
    let mut lines = value.split('\n');
    let mut out = escape_line(lines.next().unwrap_or_default(), false);
    for line in lines {
        out.push_str("\n    ");
        out.push_str(&escape_line(line, true));
    }
    out
}

/// Render a table as a Fluent resource
pub fn to_ftl(table: &LocaleTable) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "### {} ({})", table.name(), table.code());

    out.push_str("\n## Calendar\n\n");
    for (array, values) in table.calendar.arrays() {
        for (index, value) in values.iter().enumerate() {
            let _ = writeln!(out, "{} = {}", calendar_message_id(array, index), escape_pattern(value));
        }
    }

    for (kind, heading) in [(TableKind::Admin, "Admin interface"), (TableKind::User, "User interface")] {
        let _ = write!(out, "\n## {heading}\n\n");
        for (key, value) in table.entries(kind) {
            let _ = writeln!(out, "{} = {}", message_id(kind, key), escape_pattern(value));
        }
    }

    out
}

/// Variables referenced by each message of a Fluent source
pub fn message_variables(source: &str) -> Result<HashMap<String, BTreeSet<String>>, Vec<String>> {
    let resource = parse(source).map_err(|(_, errors)| {
        errors.into_iter().map(|e| format!("{e:?}")).collect::<Vec<_>>()
    })?;

    let mut messages = HashMap::new();
    for entry in resource.body {
        if let Entry::Message(message) = entry {
            let mut variables = BTreeSet::new();
            if let Some(Pattern { elements }) = &message.value {
                variables_in_pattern(elements, &mut variables);
            }
            for attribute in &message.attributes {
                variables_in_pattern(&attribute.value.elements, &mut variables);
            }
            messages.insert(message.id.name.to_string(), variables);
        }
    }
    Ok(messages)
}

fn variables_in_pattern(elements: &[PatternElement<&str>], variables: &mut BTreeSet<String>) {
    for element in elements {
        if let PatternElement::Placeable { expression } = element {
            variables_in_expression(expression, variables);
        }
    }
}

fn variables_in_expression(expression: &Expression<&str>, variables: &mut BTreeSet<String>) {
    match expression {
        Expression::Select { selector, variants } => {
            variables_in_inline(selector, variables);
            for variant in variants {
                variables_in_pattern(&variant.value.elements, variables);
            }
        }
        Expression::Inline(inline) => variables_in_inline(inline, variables),
    }
}

fn variables_in_inline(expression: &InlineExpression<&str>, variables: &mut BTreeSet<String>) {
    match expression {
        InlineExpression::VariableReference { id } => {
            variables.insert(id.name.to_string());
        }
        InlineExpression::FunctionReference { arguments, .. } => {
            for arg in &arguments.positional {
                variables_in_inline(arg, variables);
            }
            for arg in &arguments.named {
                variables_in_inline(&arg.value, variables);
            }
        }
        InlineExpression::Placeable { expression } => variables_in_expression(expression, variables),
        InlineExpression::MessageReference { .. }
        | InlineExpression::TermReference { .. }
        | InlineExpression::StringLiteral { .. }
        | InlineExpression::NumberLiteral { .. } => {}
    }
}

/// A table exported to Fluent and loaded into a thread-safe bundle
pub struct FluentExport {
    code: LocaleCode,
    bundle: FluentBundle<FluentResource>,
}

impl std::fmt::Debug for FluentExport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FluentExport")
            .field("code", &self.code)
            .field("bundle", &"FluentBundle<FluentResource>")
            .finish()
    }
}

impl FluentExport {
    /// Export a table and load it into a `FluentBundle`.
    ///
    /// Fails if the generated source does not parse or the bundle rejects
    /// it (e.g. two keys sanitize to the same message id).
    pub fn new(table: &LocaleTable) -> L10nResult<Self> {
        let code = table.code().clone();
        let source = to_ftl(table);

        let resource = FluentResource::try_new(source).map_err(|(_, errors)| L10nError::Fluent {
            code: code.to_string(),
            errors: errors.into_iter().map(|e| format!("{e:?}")).collect(),
        })?;

        let mut bundle = FluentBundle::new_concurrent(vec![code.to_language_identifier()?]);
        bundle.set_use_isolating(false);
        bundle.add_resource(resource).map_err(|errors| {
            warn!("Fluent export for {} rejected by bundle", code);
            L10nError::Fluent {
                code: code.to_string(),
                errors: errors.into_iter().map(|e| format!("{e:?}")).collect(),
            }
        })?;

        debug!("Built Fluent bundle for {}", code);
        Ok(Self { code, bundle })
    }

    /// Locale the bundle was built from
    pub fn code(&self) -> &LocaleCode {
        &self.code
    }

    /// Whether the bundle carries a message
    pub fn has_message(&self, message_id: &str) -> bool {
        self.bundle.has_message(message_id)
    }

    /// Format a message, filling `arg1`, `arg2`, … from `values`
    pub fn format<S: AsRef<str>>(&self, message_id: &str, values: &[S]) -> L10nResult<String> {
        let pattern = self
            .bundle
            .get_message(message_id)
            .and_then(|message| message.value())
            .ok_or_else(|| L10nError::key_not_found(message_id, self.code.as_str()))?;

        let args = positional_args(values);
        let mut errors = Vec::new();
        let formatted = self.bundle.format_pattern(pattern, Some(&args), &mut errors);
        if !errors.is_empty() {
            warn!("Formatting errors for message '{}': {:?}", message_id, errors);
        }
        Ok(formatted.into_owned())
    }
}

/// Build `FluentArgs` filling `arg1`, `arg2`, … from positional values
pub fn positional_args<S: AsRef<str>>(values: &[S]) -> FluentArgs<'static> {
    let mut args = FluentArgs::new();
    for (i, value) in values.iter().enumerate() {
        let index = u32::try_from(i + 1).unwrap_or(u32::MAX);
        args.set(fluent_variable(index), FluentValue::from(value.as_ref().to_string()));
    }
    args
}
