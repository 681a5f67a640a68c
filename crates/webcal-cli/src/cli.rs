//! Command line arguments

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use webcal_l10n::{Format, MonthStyle, TableKind, WeekdayStyle};

/// Inspect, validate, audit and convert the calendar's locale tables
#[derive(Parser, Debug)]
#[command(name = "webcal-l10n")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (YAML or TOML)
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Directory holding `<code>.toml` locale files
    #[arg(short, long, global = true, value_name = "DIR", conflicts_with = "bundled")]
    pub locales: Option<PathBuf>,

    /// Use the locale tables compiled into the binary
    #[arg(short, long, global = true)]
    pub bundled: bool,

    /// Log level override (trace, debug, info, warn, error)
    #[arg(long, global = true, value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the localized string for a key
    Get {
        /// Locale code, e.g. `es`
        #[arg(value_name = "LOCALE")]
        locale: String,

        /// Key to look up
        #[arg(value_name = "KEY")]
        key: String,

        /// Restrict the lookup to one dictionary
        #[arg(short, long, value_enum)]
        table: Option<TableArg>,

        /// Positional values for `$1`, `$2`, …
        #[arg(short, long = "arg", value_name = "VALUE")]
        args: Vec<String>,
    },

    /// List the available locales
    List,

    /// Print the calendar vocabulary of a locale
    Calendar {
        /// Locale code
        #[arg(value_name = "LOCALE")]
        locale: String,

        /// Use abbreviated month and weekday names
        #[arg(short, long)]
        short: bool,
    },

    /// Pick the available locale that best serves a requested tag
    Negotiate {
        /// Requested language tag, e.g. `es-MX`
        #[arg(value_name = "TAG")]
        tag: String,
    },

    /// Validate the shape of every locale file
    Check,

    /// Compare every locale with a reference locale
    Audit {
        /// Reference locale (defaults to the configured one)
        #[arg(short, long, value_name = "LOCALE")]
        reference: Option<String>,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Convert a locale table to another format
    Convert {
        /// Locale code
        #[arg(value_name = "LOCALE")]
        locale: String,

        /// Target format
        #[arg(short, long, value_enum)]
        to: FormatArg,

        /// Write to a file instead of stdout
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
}

/// Dictionary selector
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum TableArg {
    /// Admin interface strings
    Admin,
    /// User interface strings
    User,
}

impl From<TableArg> for TableKind {
    fn from(arg: TableArg) -> Self {
        match arg {
            TableArg::Admin => TableKind::Admin,
            TableArg::User => TableKind::User,
        }
    }
}

/// Output format selector
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum FormatArg {
    /// Canonical TOML
    Toml,
    /// JSON
    Json,
    /// YAML
    Yaml,
    /// Fluent resource
    Ftl,
}

impl From<FormatArg> for Format {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Toml => Format::Toml,
            FormatArg::Json => Format::Json,
            FormatArg::Yaml => Format::Yaml,
            FormatArg::Ftl => Format::Fluent,
        }
    }
}

/// Month and weekday widths for `calendar`
pub fn calendar_styles(short: bool) -> (MonthStyle, WeekdayStyle) {
    if short {
        (MonthStyle::Abbreviated, WeekdayStyle::Abbreviated)
    } else {
        (MonthStyle::Full, WeekdayStyle::Full)
    }
}
