//! Test utilities for field validation
//!
//! Records are built from the record parser fixtures so the rules are exercised
//! on exactly what the parser produces.

use crate::app::models::{DetailRecord, Finding, FindingKind, HeaderRecord, Severity, SummaryRecord};
use crate::app::services::record_parser::tests::{
    detail_fields, header_fields, record, summary_fields, with_field,
};
use crate::app::services::record_parser::{parse_detail, parse_header, parse_summary};
use crate::config::ValidatorConfig;


pub fn config() -> ValidatorConfig {
    ValidatorConfig::default()
}

pub fn header_with(index: usize, value: &str) -> HeaderRecord {
    parse_header(&record(&with_field(header_fields(), index, value)), 1)
}

pub fn summary_with(index: usize, value: &str) -> SummaryRecord {
    parse_summary(
        &record(&with_field(summary_fields("SR-1", "100.00"), index, value)),
        2,
    )
}

pub fn detail_with(index: usize, value: &str) -> DetailRecord {
    parse_detail(&record(&with_field(detail_fields("CLM-1", "SR-1"), index, value)), 3)
}

/// Findings on one field
pub fn on_field<'a>(findings: &'a [Finding], field: &str) -> Vec<&'a Finding> {
    findings.iter().filter(|f| f.field == field).collect()
}

pub fn assert_single(findings: &[Finding], field: &str, severity: Severity, kind: FindingKind) {
    assert_eq!(findings.len(), 1, "expected one finding, got {:?}", findings);
    assert_eq!(findings[0].field, field);
    assert_eq!(findings[0].severity, severity);
    assert_eq!(findings[0].kind, kind);
}
