//! Command-line argument definitions for the claim validator
//!
//! This module defines the CLI interface using the clap derive API.

use clap::{Parser, Subcommand, ValueEnum};
use rust_decimal::Decimal;
use std::path::PathBuf;

/// CLI arguments for the claim validator
///
/// Validates tab-delimited batch files reporting musical-work usage claims:
/// field formats, record business rules, cross-record references and
/// declared totals.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "claim-validator",
    version,
    about = "Validate tab-delimited musical work usage claim files",
    long_about = "Streams a claim file twice with memory bounded by the number of summary \
                  records: pass 1 checks every record's fields and builds a compact index, \
                  pass 2 resolves detail references and accumulates claimed amounts, then \
                  declared totals and footer checksums are reconciled."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Validate a claim file
    Validate(ValidateArgs),
    /// Print the effective configuration as JSON
    Config(ConfigArgs),
}

/// Arguments for the validate command
#[derive(Debug, Clone, Parser)]
pub struct ValidateArgs {
    /// Claim file to validate, or `-` to read standard input
    #[arg(value_name = "FILE")]
    pub input: PathBuf,

    /// Output format for the validation report
    #[arg(
        short = 'f',
        long = "format",
        value_enum,
        default_value = "human",
        help = "Output format for the validation report"
    )]
    pub output_format: OutputFormat,

    /// Path to configuration file
    ///
    /// JSON file with tolerances and allowed-value sets. Defaults to
    /// `<config dir>/claim-validator/config.json` when that file exists.
    #[arg(
        short = 'c',
        long = "config",
        value_name = "FILE",
        help = "Path to JSON configuration file"
    )]
    pub config_file: Option<PathBuf>,

    /// Limit the number of findings printed (the summary still counts all)
    #[arg(
        long = "max-findings",
        value_name = "N",
        help = "Print at most N findings"
    )]
    pub max_findings: Option<usize>,

    #[command(flatten)]
    pub overrides: ConfigOverrides,

    /// Treat warnings as errors when deciding the exit code
    #[arg(long = "warnings-as-errors", help = "Fail when any warning is present")]
    pub warnings_as_errors: bool,

    /// Enable verbose logging output
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Enable verbose logging (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Suppress progress and logging
    ///
    /// Only errors are logged. Overrides verbose settings.
    #[arg(
        short = 'q',
        long = "quiet",
        help = "Suppress progress bars and non-error logging",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,
}

/// Arguments for the config command
#[derive(Debug, Clone, Parser)]
pub struct ConfigArgs {
    /// Path to configuration file to load instead of the default location
    #[arg(
        short = 'c',
        long = "config",
        value_name = "FILE",
        help = "Path to JSON configuration file"
    )]
    pub config_file: Option<PathBuf>,

    #[command(flatten)]
    pub overrides: ConfigOverrides,
}

/// Configuration values that can be set on the command line
///
/// Applied on top of the defaults and the config file.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ConfigOverrides {
    /// Tolerance for amount sums and declared totals
    #[arg(
        long = "amount-tolerance",
        value_name = "AMOUNT",
        help = "Tolerance for claimed amount comparisons (default 0.02)"
    )]
    pub amount_tolerance: Option<Decimal>,

    /// Tolerance for the blended share comparison
    #[arg(
        long = "share-tolerance",
        value_name = "SHARE",
        help = "Tolerance for the blended share comparison (default 0.01)"
    )]
    pub share_tolerance: Option<Decimal>,

    /// Records between progress notifications
    #[arg(
        long = "progress-interval",
        value_name = "N",
        help = "Records between progress updates"
    )]
    pub progress_interval: Option<usize>,
}

/// Output format options for validation reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON format for scripting
    Json,
    /// CSV listing of findings
    Csv,
}

impl ValidateArgs {
    /// Log level derived from the verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            }
        }
    }

    /// Show progress bars only for interactive human output
    pub fn show_progress(&self) -> bool {
        !self.quiet && self.output_format == OutputFormat::Human
    }

    /// Whether the input is standard input
    pub fn reads_stdin(&self) -> bool {
        self.input.as_os_str() == "-"
    }
}
