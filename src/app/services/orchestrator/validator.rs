//! Two-pass claim file validator

use csv::StringRecord;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

use super::phase::Phase;
use super::progress::{NoProgress, ProgressSink, ProgressUpdate, estimate_line_count};
use super::source::{FileSource, RecordSource};
use crate::app::models::{Finding, FindingKind, RecordKind, ValidationResult};
use crate::app::services::cross_reference::{
    ValidationIndex, aggregate_totals, check_detail_reference, check_structure,
};
use crate::app::services::field_validator::{
    validate_detail, validate_footer, validate_header, validate_summary,
};
use crate::app::services::record_parser::{
    LineClass, RecordLine, RecordReader, classify, parse_detail, parse_detail_reference,
    parse_footer, parse_header, parse_summary,
};
use crate::config::ValidatorConfig;
use crate::constants::fields;
use crate::Result;

/// Validates claim files against the field, cross-record and structure rules
///
/// A validator holds no per-file state and can be reused; every call to
/// [`validate`](Self::validate) builds and drops its own index.
#[derive(Clone)]
pub struct ClaimFileValidator {
    config: ValidatorConfig,
    progress: Arc<dyn ProgressSink>,
}

impl ClaimFileValidator {
    pub fn new(config: ValidatorConfig) -> Self {
        Self {
            config,
            progress: Arc::new(NoProgress),
        }
    }

    /// Report progress to `sink`
    pub fn with_progress(mut self, sink: Arc<dyn ProgressSink>) -> Self {
        self.progress = sink;
        self
    }

    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    /// Validate a file on disk
    pub fn validate_path(&self, path: &Path) -> Result<ValidationResult> {
        self.validate(&FileSource::new(path))
    }

    /// Validate any re-openable source
    ///
    /// Problems in the file come back as findings. `Err` is reserved for I/O
    /// failures once the source has been found.
    pub fn validate(&self, source: &dyn RecordSource) -> Result<ValidationResult> {
        let start = Instant::now();
        let mut run = ValidationRun::new(&self.config, self.progress.as_ref());

        if !source.exists() {
            warn!("Source not found: {}", source.name());
            run.phase.transition(Phase::Complete)?;
            return Ok(ValidationResult::missing_source(&source.name()));
        }

        info!("Validating {}", source.name());

        run.phase.transition(Phase::Pass1)?;
        run.pass_one(source)?;

        run.phase.transition(Phase::Pass2)?;
        run.pass_two(source)?;

        run.phase.transition(Phase::PostPass)?;
        run.post_pass();

        run.phase.transition(Phase::StructureCheck)?;
        run.structure_check();

        run.phase.transition(Phase::Complete)?;
        let result = run.finish();

        info!(
            "Validated {} in {:.2}s: {} errors, {} warnings",
            source.name(),
            start.elapsed().as_secs_f64(),
            result.statistics.error_count,
            result.statistics.warning_count
        );
        Ok(result)
    }
}

impl Default for ClaimFileValidator {
    fn default() -> Self {
        Self::new(ValidatorConfig::default())
    }
}

impl std::fmt::Debug for ClaimFileValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClaimFileValidator")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// State of one validation run
struct ValidationRun<'a> {
    config: &'a ValidatorConfig,
    progress: &'a dyn ProgressSink,
    phase: Phase,
    index: ValidationIndex,
    findings: Vec<Finding>,
    /// Physical lines seen in pass 1, the exact total for pass 2
    lines_read: u64,
}

impl<'a> ValidationRun<'a> {
    fn new(config: &'a ValidatorConfig, progress: &'a dyn ProgressSink) -> Self {
        Self {
            config,
            progress,
            phase: Phase::Idle,
            index: ValidationIndex::new(),
            findings: Vec::new(),
            lines_read: 0,
        }
    }

    fn notify(&self, current: u64, total: u64) {
        self.progress.update(ProgressUpdate {
            phase: self.phase,
            current,
            total,
        });
    }

    fn pass_one(&mut self, source: &dyn RecordSource) -> Result<()> {
        let estimate = estimate_line_count(source, self.config.estimate_sample_bytes)?;
        debug!("Pass 1 over {} (about {} lines)", source.name(), estimate);
        self.notify(0, estimate);

        let interval = self.config.progress_interval.max(1);
        let mut reader = RecordReader::new(source.open()?, source.name());
        let mut record = StringRecord::new();
        let mut seen = 0usize;

        while let Some(next) = reader.read_next(&mut record)? {
            let line = match next {
                RecordLine::Record { line } => {
                    self.visit_record(&record, line);
                    line
                }
                RecordLine::Skipped { line } => {
                    self.index.note_skipped_line();
                    line
                }
                RecordLine::Undecodable { line, message } => {
                    self.index.note_record_line(line);
                    self.findings.push(Finding::error(
                        FindingKind::Parse,
                        line,
                        "",
                        fields::LINE,
                        format!("Line could not be decoded: {}", message),
                    ));
                    line
                }
            };

            self.lines_read = line as u64;
            seen += 1;
            if seen % interval == 0 {
                self.notify(self.lines_read, estimate.max(self.lines_read));
            }
        }

        self.notify(self.lines_read, self.lines_read);
        debug!(
            "Pass 1 complete: {} record lines, {} summaries, {} details, {} findings",
            self.index.total_lines,
            self.index.summary_count,
            self.index.detail_count,
            self.findings.len()
        );
        Ok(())
    }

    /// Classify, parse, field-validate and index one line
    fn visit_record(&mut self, record: &StringRecord, line: usize) {
        let kind = match classify(record) {
            LineClass::Skip => {
                self.index.note_skipped_line();
                return;
            }
            LineClass::Ignored => {
                self.index.note_record_line(line);
                self.index.note_ignored();
                return;
            }
            LineClass::Unknown(tag) => {
                self.index.note_record_line(line);
                self.index.note_unknown();
                self.findings.push(Finding::new(
                    self.config.unsupported_record_severity,
                    FindingKind::UnsupportedRecord,
                    line,
                    tag.as_str(),
                    fields::RECORD_TYPE,
                    format!("Unsupported record type '{}'", tag),
                ));
                return;
            }
            LineClass::Record(kind) => kind,
        };

        self.index.note_record_line(line);
        let config = self.config;

        let index_finding = match kind {
            RecordKind::Header => {
                let header = parse_header(record, line);
                self.findings.extend(validate_header(&header, config));
                self.index.register_header(header)
            }
            RecordKind::Summary => {
                let summary = parse_summary(record, line);
                self.findings.extend(validate_summary(&summary, config));
                self.index.register_summary(&summary)
            }
            RecordKind::Detail => {
                let detail = parse_detail(record, line);
                self.findings.extend(validate_detail(&detail, config));
                self.index.register_detail(&detail)
            }
            RecordKind::Footer => {
                let footer = parse_footer(record, line);
                self.findings.extend(validate_footer(&footer, config));
                self.index.register_footer(footer)
            }
        };

        self.findings.extend(index_finding);
    }

    fn pass_two(&mut self, source: &dyn RecordSource) -> Result<()> {
        let total = self.lines_read;
        self.notify(0, total);

        let interval = self.config.progress_interval.max(1);
        let mut reader = RecordReader::new(source.open()?, source.name());
        let mut record = StringRecord::new();
        let mut seen = 0usize;
        let mut resolved = 0usize;
        let before = self.findings.len();

        while let Some(next) = reader.read_next(&mut record)? {
            // Skipped and undecodable lines were handled in pass 1
            let RecordLine::Record { line } = next else {
                continue;
            };

            if classify(&record) == LineClass::Record(RecordKind::Detail) {
                let reference = parse_detail_reference(&record, line);
                self.findings.extend(check_detail_reference(
                    &mut self.index,
                    &reference,
                    self.config,
                ));
                resolved += 1;
            }

            seen += 1;
            if seen % interval == 0 {
                self.notify(line as u64, total);
            }
        }

        self.notify(total, total);
        debug!(
            "Pass 2 complete: {} detail references, {} findings",
            resolved,
            self.findings.len() - before
        );
        Ok(())
    }

    fn post_pass(&mut self) {
        let entries = self.index.summaries().len() as u64;
        self.notify(0, entries);
        self.findings
            .extend(aggregate_totals(&self.index, self.config));
        self.notify(entries, entries);
    }

    fn structure_check(&mut self) {
        self.notify(0, 1);
        self.findings.extend(check_structure(&self.index));
        self.notify(1, 1);
    }

    fn finish(self) -> ValidationResult {
        ValidationResult::new(self.findings, self.index.statistics())
    }
}
