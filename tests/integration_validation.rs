//! Integration tests for end-to-end claim file validation
//!
//! These tests write small claim files to disk and drive the public validator
//! API through both passes, the aggregator and the structure checks.

use claim_validator::app::services::orchestrator::SpooledSource;
use claim_validator::{ClaimFileValidator, FindingKind, Severity, ValidationResult, ValidatorConfig};
use rust_decimal_macros::dec;
use std::io::Write;
use tempfile::NamedTempFile;

const HEADER: &str = "HEAD\t1.0\tBasicProfile\tMSG-2024-0001\t2024-03-01T10:00:00Z\tPADPIDA2014120301U\tExample DSP\tPADPIDA2017051201Z\tExample Society";

fn summary(summary_id: &str, total: &str) -> String {
    format!(
        "SY02\t{}\tExampleMusicPremium\tSubscriptionModel\tOnDemandStream\tUS\t2024-01-01\t2024-01-31\tOwned\tUSD\t\t\t75\t25\t{}",
        summary_id, total
    )
}

/// Detail with shares 50/25 (blended 43.75 under a 75/25 split)
fn detail(claim_id: &str, summary_id: &str, mechanical: &str, performing: &str, total: &str) -> String {
    format!(
        "CD01\t{}\t{}\tUSRC17607839\tT-034.524.680-1\tExample Work\tJane Doe\texample::jd1\t\t\t50\t25\t43.75\t{}\t{}\t{}\t\t\t1200",
        claim_id, summary_id, mechanical, performing, total
    )
}

fn footer(lines: usize, summaries: usize) -> String {
    format!("FOOT\t{}\t{}", lines, summaries)
}

fn write_claim_file(lines: &[String]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "{}", lines.join("\n")).unwrap();
    file
}

fn validate(lines: &[String]) -> ValidationResult {
    let file = write_claim_file(lines);
    ClaimFileValidator::default()
        .validate_path(file.path())
        .unwrap()
}

fn minimal_file() -> Vec<String> {
    vec![
        HEADER.to_string(),
        summary("SR-1", "100.00"),
        detail("CLM-1", "SR-1", "75.00", "25.00", "100.00"),
        footer(4, 1),
    ]
}

/// Test the minimal well-formed file
///
/// Purpose: One header, one summary, one matching detail and a footer pass cleanly
/// Benefit: Anchors every other test to a known-good baseline
#[test]
fn test_minimal_well_formed_file() {
    let result = validate(&minimal_file());

    assert!(result.valid, "unexpected findings: {:?}", result.findings);
    assert_eq!(result.statistics.error_count, 0);
    assert_eq!(result.statistics.total_lines, 4);
    assert_eq!(result.statistics.summary_records, 1);
    assert_eq!(result.statistics.detail_records, 1);
    assert_eq!(result.statistics.total_claimed_amount, dec!(100.00));
    assert_eq!(result.statistics.summary_totals["SR-1"], dec!(100.00));
}

/// Test referential errors for unknown summary references
///
/// Purpose: Each detail whose reference matches no summary gets exactly one error
/// Benefit: Case variants of a real identifier must still resolve
#[test]
fn test_unresolved_references() {
    let lines = vec![
        HEADER.to_string(),
        summary("SR-1", "100.00"),
        detail("CLM-1", "sr-1", "75.00", "25.00", "100.00"),
        detail("CLM-2", "SR-404", "7.50", "2.50", "10.00"),
        detail("CLM-3", "SR-405", "7.50", "2.50", "10.00"),
        footer(6, 1),
    ];
    let result = validate(&lines);

    let referential: Vec<_> = result.findings_of_kind(FindingKind::Referential).collect();
    assert_eq!(referential.len(), 2);
    assert_eq!(referential[0].line, 4);
    assert_eq!(referential[1].line, 5);
    assert_eq!(result.statistics.error_count, 2);
}

/// Test split sum rule
///
/// Purpose: A summary split summing to 95 yields one finding naming both fields
#[test]
fn test_split_sum_mismatch() {
    let mut lines = minimal_file();
    lines[1] = lines[1].replace("\t75\t25\t", "\t75\t20\t");
    let result = validate(&lines);

    // The detail's blended share no longer matches either; only line 2 matters here
    let on_summary: Vec<_> = result.findings.iter().filter(|f| f.line == 2).collect();
    assert_eq!(on_summary.len(), 1, "findings: {:?}", result.findings);
    assert_eq!(on_summary[0].kind, FindingKind::RangeOrSum);
    assert_eq!(
        on_summary[0].field,
        "MechanicalRightsSplit/PerformingRightsSplit"
    );
}

/// Test aggregator tolerance
///
/// Purpose: Declared vs accumulated totals differing by more than 0.02 fail;
/// a difference of exactly 0.02 passes
#[test]
fn test_aggregate_tolerance() {
    let short = vec![
        HEADER.to_string(),
        summary("SR-1", "100.00"),
        detail("CLM-1", "SR-1", "72.50", "25.00", "97.50"),
        footer(4, 1),
    ];
    let result = validate(&short);
    assert_eq!(result.statistics.error_count, 1);
    assert_eq!(result.findings[0].field, "TotalClaimedAmount");
    assert!(result.findings[0].message.contains("100.00"));
    assert!(result.findings[0].message.contains("97.50"));

    let boundary = vec![
        HEADER.to_string(),
        summary("SR-1", "100.00"),
        detail("CLM-1", "SR-1", "74.98", "25.00", "99.98"),
        footer(4, 1),
    ];
    let result = validate(&boundary);
    assert!(result.valid, "unexpected findings: {:?}", result.findings);
}

/// Test idempotence
///
/// Purpose: Validating the same file twice gives identical findings and statistics
/// Benefit: Guards against state leaking between runs of one validator
#[test]
fn test_repeat_validation_is_identical() {
    let lines = vec![
        summary("SR-1", "90.00"),
        HEADER.to_string(),
        detail("CLM-1", "SR-1", "75.00", "25.00", "100.00"),
        detail("clm-1", "SR-2", "75.00", "25.00", "100.00"),
        footer(7, 2),
        "XX01\tstray".to_string(),
    ];
    let file = write_claim_file(&lines);
    let validator = ClaimFileValidator::default();

    let first = validator.validate_path(file.path()).unwrap();
    let second = validator.validate_path(file.path()).unwrap();

    assert!(!first.valid);
    assert_eq!(first.findings, second.findings);
    assert_eq!(first.statistics, second.statistics);
}

/// Test duplicate claim identifiers
///
/// Purpose: Each repeat after the first is one error at the repeating line
#[test]
fn test_duplicate_claim_ids() {
    let lines = vec![
        HEADER.to_string(),
        summary("SR-1", "300.00"),
        detail("CLM-1", "SR-1", "75.00", "25.00", "100.00"),
        detail("clm-1", "SR-1", "75.00", "25.00", "100.00"),
        detail("Clm-1", "SR-1", "75.00", "25.00", "100.00"),
        footer(6, 1),
    ];
    let result = validate(&lines);

    let duplicates: Vec<_> = result.findings_of_kind(FindingKind::DuplicateKey).collect();
    assert_eq!(duplicates.len(), 2);
    assert_eq!(duplicates[0].line, 4);
    assert_eq!(duplicates[1].line, 5);
    assert_eq!(result.statistics.error_count, 2);
}

/// Test footer summary count checksum
///
/// Purpose: A footer declaring 2 summaries when 3 exist is one structural error
#[test]
fn test_footer_summary_count_mismatch() {
    let lines = vec![
        HEADER.to_string(),
        summary("SR-1", "100.00"),
        summary("SR-2", "0.00"),
        summary("SR-3", "0.00"),
        detail("CLM-1", "SR-1", "75.00", "25.00", "100.00"),
        footer(6, 2),
    ];
    let result = validate(&lines);

    let structural: Vec<_> = result.findings_of_kind(FindingKind::Structural).collect();
    assert_eq!(structural.len(), 1);
    assert!(structural[0].message.contains('2'));
    assert!(structural[0].message.contains('3'));
    assert_eq!(result.statistics.error_count, 1);
}

/// Test missing header and footer
#[test]
fn test_missing_header_and_footer() {
    let lines = vec![
        summary("SR-1", "100.00"),
        detail("CLM-1", "SR-1", "75.00", "25.00", "100.00"),
    ];
    let result = validate(&lines);

    let structural: Vec<_> = result.findings_of_kind(FindingKind::Structural).collect();
    assert_eq!(structural.len(), 2);
    assert!(!result.valid);
}

/// Test record after footer
#[test]
fn test_record_after_footer() {
    let mut lines = minimal_file();
    lines[3] = footer(5, 1);
    lines.push("RE01\ttrailing release".to_string());
    let result = validate(&lines);

    let structural: Vec<_> = result.findings_of_kind(FindingKind::Structural).collect();
    assert_eq!(structural.len(), 1);
    assert_eq!(structural[0].line, 4);
}

/// Test missing source
///
/// Purpose: A nonexistent path yields one fatal finding and empty statistics
#[test]
fn test_missing_source_file() {
    let result = ClaimFileValidator::default()
        .validate_path(std::path::Path::new("/nonexistent/claims.tsv"))
        .unwrap();

    assert!(!result.valid);
    assert_eq!(result.findings.len(), 1);
    assert_eq!(result.findings[0].kind, FindingKind::Fatal);
    assert_eq!(result.statistics.total_lines, 0);
    assert_eq!(result.statistics.summary_records, 0);
}

/// Test stdin-style spooled input
///
/// Purpose: A non-seekable stream is spooled once and read in both passes
#[test]
fn test_spooled_stream_source() {
    let content = minimal_file().join("\n");
    let source = SpooledSource::from_reader(content.as_bytes(), "<stdin>").unwrap();
    let result = ClaimFileValidator::default().validate(&source).unwrap();

    assert!(result.valid, "unexpected findings: {:?}", result.findings);
    assert_eq!(result.statistics.total_claimed_amount, dec!(100.00));
}

/// Test unsupported record severity from configuration
#[test]
fn test_unsupported_record_severity_configurable() {
    let mut lines = minimal_file();
    lines.insert(3, "ZZ01\tcustom".to_string());
    lines[4] = footer(5, 1);
    let file = write_claim_file(&lines);

    let default = ClaimFileValidator::default()
        .validate_path(file.path())
        .unwrap();
    assert!(default.valid);
    assert_eq!(default.statistics.warning_count, 1);

    let mut strict_config = ValidatorConfig::default();
    strict_config.unsupported_record_severity = Severity::Error;
    let strict = ClaimFileValidator::new(strict_config)
        .validate_path(file.path())
        .unwrap();
    assert!(!strict.valid);
}

/// Test comments in a non-UTF-8 encoding
///
/// Purpose: A Latin-1 comment above the header is skipped, not a parse error
/// Benefit: Line counts and the header-first rule ignore comments of any encoding
#[test]
fn test_latin1_comment_is_skipped() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(b"# r\xe9sum\xe9 comment\n").unwrap();
    writeln!(file, "{}", minimal_file().join("\n")).unwrap();

    let result = ClaimFileValidator::default()
        .validate_path(file.path())
        .unwrap();

    assert!(result.valid, "unexpected findings: {:?}", result.findings);
    assert_eq!(result.statistics.total_lines, 4);
    assert_eq!(result.statistics.skipped_lines, 1);
}

/// Test amounts at the edge of decimal range
///
/// Purpose: Splits and claimed amounts whose sums do not fit are findings
/// Benefit: A huge but well-formed number never aborts the run
#[test]
fn test_unrepresentable_sums_are_findings() {
    let max = rust_decimal::Decimal::MAX.to_string();

    let mut huge_split = minimal_file();
    huge_split[1] = huge_split[1].replace("\t75\t25\t", &format!("\t{}\t{}\t", max, max));
    let result = validate(&huge_split);
    assert!(!result.valid);
    assert!(
        result
            .findings
            .iter()
            .any(|f| f.line == 2 && f.message.contains("overflows"))
    );

    let lines = vec![
        HEADER.to_string(),
        summary("SR-1", "100.00"),
        detail("CLM-1", "SR-1", "0", &max, &max),
        detail("CLM-2", "SR-1", "0", &max, &max),
        footer(5, 1),
    ];
    let result = validate(&lines);
    let overflow: Vec<_> = result
        .findings
        .iter()
        .filter(|f| f.message.contains("overflows"))
        .collect();
    assert_eq!(overflow.len(), 1, "findings: {:?}", result.findings);
    assert_eq!(overflow[0].line, 4);
    assert_eq!(overflow[0].kind, FindingKind::RangeOrSum);
}

/// Test negative claimed amounts
///
/// Purpose: Negative detail amounts are errors and never offset other claims
#[test]
fn test_negative_detail_amounts_do_not_offset() {
    let lines = vec![
        HEADER.to_string(),
        summary("SR-1", "0.00"),
        detail("CLM-1", "SR-1", "75.00", "25.00", "100.00"),
        detail("CLM-2", "SR-1", "-75.00", "-25.00", "-100.00"),
        footer(5, 1),
    ];
    let result = validate(&lines);

    assert!(!result.valid);
    let on_negative: Vec<_> = result.findings.iter().filter(|f| f.line == 4).collect();
    assert_eq!(on_negative.len(), 3, "findings: {:?}", result.findings);
    assert!(on_negative.iter().all(|f| f.kind == FindingKind::RangeOrSum));

    // Declared 0.00 against an accumulated 100.00
    let on_summary: Vec<_> = result.findings.iter().filter(|f| f.line == 2).collect();
    assert_eq!(on_summary.len(), 1);
    assert_eq!(result.statistics.summary_totals["SR-1"], dec!(100.00));
}

/// Test memory-bounded accumulation across many details
///
/// Purpose: Many details spread over a few summaries reconcile exactly
/// Benefit: Exercises exact decimal accumulation without float drift
#[test]
fn test_many_details_reconcile_exactly() {
    let mut lines = vec![HEADER.to_string()];
    lines.push(summary("SR-A", "1000.00"));
    lines.push(summary("SR-B", "1000.00"));
    for n in 0..10_000 {
        let summary_id = if n % 2 == 0 { "SR-A" } else { "SR-B" };
        lines.push(detail(&format!("CLM-{}", n), summary_id, "0.15", "0.05", "0.20"));
    }
    lines.push(footer(10_004, 2));

    let result = validate(&lines);
    assert!(result.valid, "unexpected findings: {:?}", result.findings.first());
    assert_eq!(result.statistics.detail_records, 10_000);
    assert_eq!(result.statistics.total_claimed_amount, dec!(2000.00));
}
