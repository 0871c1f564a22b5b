//! Command implementations for the claim validator CLI
//!
//! Each command lives in its own module:
//! - `validate`: Run the two-pass validation and render the report
//! - `config`: Print the effective configuration
//!
//! Reports are rendered by `report`; logging, configuration loading and the
//! progress bar are in `shared`.

pub mod config;
pub mod report;
pub mod shared;
pub mod validate;

use crate::cli::args::{Args, Commands};

/// How a successful run ended, mapped to the process exit code by `main`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// No Error findings (and no warnings under `--warnings-as-errors`)
    Valid,
    /// The file failed validation
    Invalid,
}

impl Outcome {
    pub fn exit_code(&self) -> i32 {
        match self {
            Outcome::Valid => 0,
            Outcome::Invalid => 1,
        }
    }
}

/// Dispatch to the subcommand handler
pub async fn run(args: Args) -> anyhow::Result<Outcome> {
    match args.command {
        Commands::Validate(validate_args) => validate::run_validate(validate_args).await,
        Commands::Config(config_args) => config::run_config(config_args),
    }
}
