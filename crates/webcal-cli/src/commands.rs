//! Subcommand implementations
//!
//! Every command writes its output to a caller supplied writer and
//! reports whether it succeeded, so the binary can map the outcome to an
//! exit code.

use crate::cli::{calendar_styles, Commands, FormatArg, TableArg};
use anyhow::{Context, Result};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use webcal_config::Config;
use webcal_l10n::{
    audit_catalog, bundled_tables, encode, substitute, validate_shape, AuditPolicy, Catalog,
    FluentExport, Format, LocaleCode, LocaleLoader,
};

/// Where locale tables are read from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    /// Tables compiled into the binary
    Bundled,
    /// `<code>.toml` files in a directory
    Directory(PathBuf),
}

impl Source {
    /// Resolve the source from configuration
    pub fn from_config(config: &Config) -> Self {
        if config.locales.bundled {
            Self::Bundled
        } else {
            Self::Directory(config.locales.dir.clone())
        }
    }
}

/// Runs subcommands against one configuration
#[derive(Debug)]
pub struct App {
    config: Config,
    source: Source,
}

impl App {
    /// Create an app reading tables from the configured source
    pub fn new(config: Config) -> Self {
        let source = Source::from_config(&config);
        Self { config, source }
    }

    fn default_locale(&self) -> Result<LocaleCode> {
        LocaleCode::parse(&self.config.locales.default_locale)
            .context("invalid default locale in configuration")
    }

    /// Build the catalog from the configured source
    pub fn catalog(&self) -> Result<Catalog> {
        let default_locale = self.default_locale()?;
        let catalog = match &self.source {
            Source::Bundled => Catalog::new(default_locale, bundled_tables()?)?,
            Source::Directory(dir) => Catalog::load_dir(dir, default_locale)
                .with_context(|| format!("failed to load locales from {}", dir.display()))?,
        };
        Ok(catalog)
    }

    fn audit_policy(&self) -> AuditPolicy {
        let audit = &self.config.audit;
        AuditPolicy {
            fail_on_missing: audit.fail_on_missing,
            fail_on_placeholder_mismatch: audit.fail_on_placeholder_mismatch,
            report_untranslated: audit.report_untranslated,
        }
    }

    /// Run one subcommand, returning whether it succeeded
    pub fn run<W: Write>(&self, command: &Commands, out: &mut W) -> Result<bool> {
        debug!("Running {:?} against {:?}", command, self.source);
        match command {
            Commands::Get {
                locale,
                key,
                table,
                args,
            } => self.get(locale, key, *table, args, out),
            Commands::List => self.list(out),
            Commands::Calendar { locale, short } => self.calendar(locale, *short, out),
            Commands::Negotiate { tag } => self.negotiate(tag, out),
            Commands::Check => self.check(out),
            Commands::Audit { reference, json } => self.audit(reference.as_deref(), *json, out),
            Commands::Convert { locale, to, output } => {
                self.convert(locale, *to, output.as_deref(), out)
            }
        }
    }

    fn get<W: Write>(
        &self,
        locale: &str,
        key: &str,
        table: Option<TableArg>,
        args: &[String],
        out: &mut W,
    ) -> Result<bool> {
        let catalog = self.catalog()?;
        let found = catalog.lookup(locale, table.map(Into::into), key)?;
        if found.fell_back {
            warn!("'{}' is not translated for {}, showing {}", key, locale, found.locale);
        }

        let value = if args.is_empty() {
            found.value.to_string()
        } else {
            substitute(found.value, args)
        };
        writeln!(out, "{value}")?;
        Ok(true)
    }

    fn list<W: Write>(&self, out: &mut W) -> Result<bool> {
        let catalog = self.catalog()?;
        for table in catalog.tables() {
            let marker = if table.code() == catalog.default_locale() { "*" } else { " " };
            writeln!(
                out,
                "{marker} {:<6} {:<12} admin: {:>3}  user: {:>3}",
                table.code(),
                table.name(),
                table.admin.len(),
                table.user.len()
            )?;
        }
        Ok(true)
    }

    fn calendar<W: Write>(&self, locale: &str, short: bool, out: &mut W) -> Result<bool> {
        let catalog = self.catalog()?;
        let (month_style, weekday_style) = calendar_styles(short);

        let months = (1..=12)
            .map(|month| catalog.month_name(locale, month, month_style))
            .collect::<Result<Vec<_>, _>>()?;
        let weekdays = (0..7)
            .map(|day| catalog.weekday_name(locale, day, weekday_style))
            .collect::<Result<Vec<_>, _>>()?;
        let dhm = catalog.dhm(locale)?;

        writeln!(out, "months:   {}", months.join(", "))?;
        writeln!(out, "weekdays: {}", weekdays.join(", "))?;
        writeln!(out, "d/h/m:    {}", dhm.join(" "))?;
        Ok(true)
    }

    fn negotiate<W: Write>(&self, tag: &str, out: &mut W) -> Result<bool> {
        let catalog = self.catalog()?;
        writeln!(out, "{}", catalog.negotiate(tag))?;
        Ok(true)
    }

    fn check<W: Write>(&self, out: &mut W) -> Result<bool> {
        let mut failures = 0;

        match &self.source {
            Source::Bundled => {
                for table in bundled_tables()? {
                    let violations = validate_shape(&table);
                    if violations.is_empty() {
                        writeln!(out, "ok    {}", table.code())?;
                    } else {
                        failures += 1;
                        for violation in violations {
                            writeln!(out, "FAIL  {}: {violation}", table.code())?;
                        }
                    }
                }
            }
            Source::Directory(dir) => {
                let loader = LocaleLoader::new(dir);
                let files = loader
                    .discover()
                    .with_context(|| format!("failed to read {}", dir.display()))?;
                for (code, path) in files {
                    match LocaleLoader::load_file(&path) {
                        Ok(_) => writeln!(out, "ok    {code}")?,
                        Err(e) => {
                            failures += 1;
                            writeln!(out, "FAIL  {}: {e}", path.display())?;
                        }
                    }
                }
            }
        }

        info!("Shape check finished with {} failing locales", failures);
        Ok(failures == 0)
    }

    fn audit<W: Write>(&self, reference: Option<&str>, json: bool, out: &mut W) -> Result<bool> {
        let catalog = self.catalog()?;
        let policy = self.audit_policy();
        let reference = reference.unwrap_or(self.config.locales.reference_locale.as_str());
        let report = audit_catalog(&catalog, reference, &policy)?;

        if json {
            writeln!(out, "{}", report.to_json()?)?;
        } else {
            writeln!(out, "Reference locale: {}", report.reference)?;
            for audit in &report.locales {
                writeln!(
                    out,
                    "\n{} ({}): {:.1}% of {} keys",
                    audit.code,
                    audit.name,
                    audit.coverage * 100.0,
                    audit.reference_keys
                )?;
                for finding in &audit.findings {
                    let mark = if finding.is_failure(&policy) { "!" } else { "-" };
                    writeln!(out, "  {mark} {finding}")?;
                }
            }
        }

        let failures = report.failure_count(&policy);
        if failures > 0 {
            warn!("Audit found {} failing findings", failures);
        }
        Ok(failures == 0)
    }

    fn convert<W: Write>(
        &self,
        locale: &str,
        to: FormatArg,
        output: Option<&Path>,
        out: &mut W,
    ) -> Result<bool> {
        let catalog = self.catalog()?;
        let table = catalog.table(locale)?;
        let format = Format::from(to);

        if format == Format::Fluent {
            // the export must load into a bundle before it is written anywhere
            FluentExport::new(table)?;
        }
        let text = encode(table, format)?;

        match output {
            Some(path) => {
                std::fs::write(path, &text)
                    .with_context(|| format!("failed to write {}", path.display()))?;
                info!("Wrote {} {} to {}", table.code(), format.name(), path.display());
            }
            None => out.write_all(text.as_bytes())?,
        }
        Ok(true)
    }
}

