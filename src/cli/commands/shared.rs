//! Shared components for CLI commands
//!
//! Logging setup, layered configuration loading and the terminal progress bar.

use crate::app::services::orchestrator::{Phase, ProgressSink, ProgressUpdate};
use crate::cli::args::ConfigOverrides;
use crate::config::ValidatorConfig;
use anyhow::Context;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use tracing::{debug, info};

/// Set up structured logging on stderr
pub fn setup_logging(log_level: &str) {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("claim_validator={}", log_level)));

    // try_init: a second command in the same process keeps the first subscriber
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_level(true)
                .with_timer(fmt::time::uptime())
                .with_writer(std::io::stderr),
        )
        .try_init();

    debug!("Logging initialized at level: {}", log_level);
}

/// Load configuration: explicit file, else default file if present, else
/// defaults; command-line overrides are applied last
pub fn load_configuration(
    config_file: Option<&Path>,
    overrides: &ConfigOverrides,
) -> anyhow::Result<ValidatorConfig> {
    match config_file {
        Some(path) => info!("Using config file: {}", path.display()),
        None => debug!("No config file given, checking default location"),
    }

    let config = ValidatorConfig::load_layered(config_file).with_context(|| match config_file {
        Some(path) => format!("Failed to load configuration from {}", path.display()),
        None => "Failed to load configuration".to_string(),
    })?;

    let config = apply_cli_overrides(config, overrides);

    // Final validation
    config
        .validate()
        .context("Invalid configuration after command-line overrides")?;

    Ok(config)
}

/// Apply command-line overrides to configuration
pub fn apply_cli_overrides(
    mut config: ValidatorConfig,
    overrides: &ConfigOverrides,
) -> ValidatorConfig {
    if let Some(tolerance) = overrides.amount_tolerance {
        config = config.with_amount_tolerance(tolerance);
    }
    if let Some(tolerance) = overrides.share_tolerance {
        config = config.with_share_tolerance(tolerance);
    }
    if let Some(interval) = overrides.progress_interval {
        config = config.with_progress_interval(interval);
    }
    config
}

/// Progress bar that follows the validation phases
pub struct ProgressReporter {
    progress_bar: ProgressBar,
}

impl ProgressReporter {
    /// Create a progress bar on stderr
    pub fn new() -> Self {
        let pb = ProgressBar::new(0);
        let style = ProgressStyle::default_bar()
            .template(
                "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} lines ({percent}%) | {msg}",
            )
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("█▉▊▋▌▍▎▏  ");
        pb.set_style(style);
        Self { progress_bar: pb }
    }

    /// Clear the bar before the report is printed
    pub fn finish(&self) {
        self.progress_bar.finish_and_clear();
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressSink for ProgressReporter {
    fn update(&self, update: ProgressUpdate) {
        let label = update.phase.label();
        if self.progress_bar.message() != label {
            self.progress_bar.set_message(label);
            self.progress_bar.reset_elapsed();
        }

        // Pass 1 totals are estimates; never let the bar overflow
        self.progress_bar
            .set_length(update.total.max(update.current));
        self.progress_bar.set_position(update.current);

        if update.phase == Phase::StructureCheck && update.current == update.total {
            self.progress_bar.finish_and_clear();
        }
    }
}

impl Drop for ProgressReporter {
    fn drop(&mut self) {
        if !self.progress_bar.is_finished() {
            self.progress_bar.finish_and_clear();
        }
    }
}
