//! Validation result and statistics
//!
//! This is the output contract consumed by the renderers: an overall validity
//! flag, the ordered findings and a statistics block.

use super::finding::{Finding, FindingKind, Severity};
use crate::constants::{fields, tags};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Counters and totals gathered while validating one file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    /// Record lines seen (blank and comment lines excluded)
    pub total_lines: usize,
    pub header_records: usize,
    pub summary_records: usize,
    pub detail_records: usize,
    pub footer_records: usize,
    pub ignored_records: usize,
    pub unknown_records: usize,
    /// Blank and comment lines
    pub skipped_lines: usize,
    /// Accumulated detail amount per summary identifier
    pub summary_totals: BTreeMap<String, Decimal>,
    pub total_claimed_amount: Decimal,
    pub error_count: usize,
    pub warning_count: usize,
    pub info_count: usize,
}

/// Final result of validating one file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub valid: bool,
    pub findings: Vec<Finding>,
    pub statistics: Statistics,
}

impl ValidationResult {
    /// Assemble a result, deriving validity and severity counts from the findings
    pub fn new(findings: Vec<Finding>, mut statistics: Statistics) -> Self {
        statistics.error_count = count_severity(&findings, Severity::Error);
        statistics.warning_count = count_severity(&findings, Severity::Warning);
        statistics.info_count = count_severity(&findings, Severity::Info);

        Self {
            valid: statistics.error_count == 0,
            findings,
            statistics,
        }
    }

    /// Result for a source that does not exist
    pub fn missing_source(path: &str) -> Self {
        let finding = Finding::error(
            FindingKind::Fatal,
            0,
            tags::FILE,
            fields::PATH,
            format!("Source file not found: {}", path),
        );
        Self::new(vec![finding], Statistics::default())
    }

    pub fn has_errors(&self) -> bool {
        self.statistics.error_count > 0
    }

    pub fn has_warnings(&self) -> bool {
        self.statistics.warning_count > 0
    }

    /// Findings with Error severity
    pub fn errors(&self) -> impl Iterator<Item = &Finding> {
        self.findings.iter().filter(|f| f.is_error())
    }

    /// Findings of a given kind
    pub fn findings_of_kind(&self, kind: FindingKind) -> impl Iterator<Item = &Finding> {
        self.findings.iter().filter(move |f| f.kind == kind)
    }
}

fn count_severity(findings: &[Finding], severity: Severity) -> usize {
    findings.iter().filter(|f| f.severity == severity).count()
}
