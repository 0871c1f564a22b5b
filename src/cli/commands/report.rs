//! Report rendering for the validate command
//!
//! Three formats: a colored human summary, a JSON document and a CSV listing
//! of findings. `max_findings` limits what is printed, never what is counted.

use crate::app::models::{Finding, Severity, Statistics, ValidationResult};
use crate::cli::args::OutputFormat;
use colored::*;
use serde::Serialize;
use std::io::Write;

/// What the renderers need to know about one run
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportView<'a> {
    pub source: &'a str,
    /// Validity after `--warnings-as-errors` has been applied
    pub valid: bool,
    pub findings: &'a [Finding],
    /// Findings left out because of `--max-findings`
    pub omitted_findings: usize,
    pub statistics: &'a Statistics,
}

impl<'a> ReportView<'a> {
    pub fn new(
        source: &'a str,
        result: &'a ValidationResult,
        warnings_as_errors: bool,
        max_findings: Option<usize>,
    ) -> Self {
        let shown = max_findings
            .unwrap_or(result.findings.len())
            .min(result.findings.len());

        Self {
            source,
            valid: result.valid && !(warnings_as_errors && result.has_warnings()),
            findings: &result.findings[..shown],
            omitted_findings: result.findings.len() - shown,
            statistics: &result.statistics,
        }
    }
}

/// Render a report in the requested format
pub fn render<W: Write>(
    writer: &mut W,
    view: &ReportView<'_>,
    format: OutputFormat,
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Human => render_human(writer, view)?,
        OutputFormat::Json => render_json(writer, view)?,
        OutputFormat::Csv => render_csv(writer, view)?,
    }
    Ok(())
}

fn severity_label(severity: Severity) -> ColoredString {
    let label = format!("{:<7}", severity.to_string());
    match severity {
        Severity::Error => label.bright_red().bold(),
        Severity::Warning => label.bright_yellow(),
        Severity::Info => label.bright_blue(),
    }
}

/// Human-readable report
pub fn render_human<W: Write>(writer: &mut W, view: &ReportView<'_>) -> std::io::Result<()> {
    let stats = view.statistics;

    writeln!(
        writer,
        "{} {}",
        "Claim file:".bright_cyan(),
        view.source.bright_white()
    )?;

    let status = if view.valid {
        "VALID".bright_green().bold()
    } else {
        "INVALID".bright_red().bold()
    };
    writeln!(writer, "  {} {}", "Status:".bright_cyan(), status)?;

    writeln!(
        writer,
        "  {} {} ({} header, {} summary, {} detail, {} footer, {} ignored, {} unknown)",
        "Records:".bright_cyan(),
        stats.total_lines.to_string().bright_white().bold(),
        stats.header_records,
        stats.summary_records,
        stats.detail_records,
        stats.footer_records,
        stats.ignored_records,
        stats.unknown_records
    )?;
    writeln!(
        writer,
        "  {} {}",
        "Total claimed:".bright_cyan(),
        stats.total_claimed_amount.to_string().bright_white().bold()
    )?;
    writeln!(
        writer,
        "  {} {} errors, {} warnings, {} info",
        "Findings:".bright_cyan(),
        stats.error_count.to_string().bright_red(),
        stats.warning_count.to_string().bright_yellow(),
        stats.info_count
    )?;

    if !view.findings.is_empty() {
        writeln!(writer)?;
    }
    for finding in view.findings {
        writeln!(
            writer,
            "  {} line {:>6}  {:<8} {:<28} [{}] {}",
            severity_label(finding.severity),
            finding.line,
            finding.record_type,
            finding.field,
            finding.kind,
            finding.message
        )?;
    }

    if view.omitted_findings > 0 {
        writeln!(
            writer,
            "  {}",
            format!("... {} more findings not shown", view.omitted_findings).dimmed()
        )?;
    }

    Ok(())
}

/// JSON report
pub fn render_json<W: Write>(writer: &mut W, view: &ReportView<'_>) -> anyhow::Result<()> {
    serde_json::to_writer_pretty(&mut *writer, view)?;
    writeln!(writer)?;
    Ok(())
}

/// CSV listing of findings, one row per finding
pub fn render_csv<W: Write>(writer: &mut W, view: &ReportView<'_>) -> anyhow::Result<()> {
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    csv_writer.write_record(["line", "recordType", "field", "message", "severity", "kind"])?;
    for finding in view.findings {
        csv_writer.serialize(finding)?;
    }
    csv_writer.flush()?;
    Ok(())
}
