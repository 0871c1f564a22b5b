//! Validate command implementation
//!
//! Loads configuration, opens the source (spooling stdin so it can be read
//! twice), runs the validator on a blocking thread and renders the report.

use super::Outcome;
use super::report::{ReportView, render};
use super::shared::{ProgressReporter, load_configuration, setup_logging};
use crate::app::services::orchestrator::{
    ClaimFileValidator, FileSource, RecordSource, SpooledSource,
};
use crate::cli::args::ValidateArgs;
use anyhow::Context;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

/// Validate command runner
pub async fn run_validate(args: ValidateArgs) -> anyhow::Result<Outcome> {
    let start_time = Instant::now();
    setup_logging(args.get_log_level());
    debug!("Validate arguments: {:?}", args);

    let config = load_configuration(args.config_file.as_deref(), &args.overrides)?;

    let source: Box<dyn RecordSource> = if args.reads_stdin() {
        info!("Spooling standard input");
        Box::new(SpooledSource::from_stdin().context("Failed to read standard input")?)
    } else {
        Box::new(FileSource::new(&args.input))
    };
    let source_name = source.name();

    let reporter = args.show_progress().then(|| Arc::new(ProgressReporter::new()));
    let mut validator = ClaimFileValidator::new(config);
    if let Some(reporter) = &reporter {
        validator = validator.with_progress(reporter.clone());
    }

    let result = tokio::task::spawn_blocking(move || validator.validate(source.as_ref()))
        .await
        .context("Validation task failed")?
        .with_context(|| format!("Failed to validate {}", source_name))?;

    if let Some(reporter) = &reporter {
        reporter.finish();
    }

    let view = ReportView::new(
        &source_name,
        &result,
        args.warnings_as_errors,
        args.max_findings,
    );
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    render(&mut out, &view, args.output_format)?;

    info!(
        "Finished in {:.2}s",
        start_time.elapsed().as_secs_f64()
    );

    Ok(if view.valid {
        Outcome::Valid
    } else {
        Outcome::Invalid
    })
}
