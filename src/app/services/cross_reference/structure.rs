//! File-level structure checks
//!
//! Works only from index metadata; the source is not read again.

use crate::app::models::{Finding, FindingKind, RecordKind};
use crate::constants::{fields, tags};

use super::index::ValidationIndex;

fn structural(line: usize, record_type: &str, field: &str, message: String) -> Finding {
    Finding::error(FindingKind::Structural, line, record_type, field, message)
}

/// Header first, footer last, footer counts match
pub fn check_structure(index: &ValidationIndex) -> Vec<Finding> {
    let mut findings = Vec::new();
    let header_label = RecordKind::Header.label();
    let footer_label = RecordKind::Footer.label();

    match index.header() {
        None => findings.push(structural(
            0,
            tags::FILE,
            fields::RECORD_TYPE,
            format!("Missing header record ({})", header_label),
        )),
        Some(header) if index.first_record_line != Some(header.line) => {
            findings.push(structural(
                header.line,
                header_label,
                fields::LINE,
                format!(
                    "Header record must be the first record, but line {} comes before it",
                    index.first_record_line.unwrap_or_default()
                ),
            ))
        }
        Some(_) => {}
    }

    let Some(footer) = index.footer() else {
        findings.push(structural(
            0,
            tags::FILE,
            fields::RECORD_TYPE,
            format!("Missing footer record ({})", footer_label),
        ));
        return findings;
    };

    if let Some(last) = index.last_record_line.filter(|&last| last > footer.line) {
        findings.push(structural(
            footer.line,
            footer_label,
            fields::LINE,
            format!(
                "Footer record must be the last record, but line {} follows it",
                last
            ),
        ));
    }

    if let Some(declared) = footer.number_of_lines {
        let actual = index.total_lines as u64;
        if declared != actual {
            findings.push(structural(
                footer.line,
                footer_label,
                fields::NUMBER_OF_LINES,
                format!(
                    "Footer declares {} lines but the file has {}",
                    declared, actual
                ),
            ));
        }
    }

    if let Some(declared) = footer.number_of_summary_records {
        let actual = index.summary_count as u64;
        if declared != actual {
            findings.push(structural(
                footer.line,
                footer_label,
                fields::NUMBER_OF_SUMMARY_RECORDS,
                format!(
                    "Footer declares {} summary records but the file has {}",
                    declared, actual
                ),
            ));
        }
    }

    findings
}
