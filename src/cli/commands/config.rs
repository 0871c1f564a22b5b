//! Config command: print the effective configuration

use super::Outcome;
use super::shared::{load_configuration, setup_logging};
use crate::cli::args::ConfigArgs;
use anyhow::Context;

pub fn run_config(args: ConfigArgs) -> anyhow::Result<Outcome> {
    setup_logging("warn");

    let config = load_configuration(args.config_file.as_deref(), &args.overrides)?;
    let json =
        serde_json::to_string_pretty(&config).context("Failed to serialize configuration")?;
    println!("{}", json);

    Ok(Outcome::Valid)
}
