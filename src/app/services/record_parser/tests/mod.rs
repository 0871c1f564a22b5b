//! Test utilities and fixtures for record parsing
//!
//! The fixture builders here produce well-formed lines for every record type;
//! other service test modules reuse them and override single fields.

use csv::StringRecord;
use std::io::Write;
use tempfile::NamedTempFile;


/// Well-formed header fields
pub fn header_fields() -> Vec<String> {
    to_owned(&[
        "HEAD",
        "1.0",
        "BasicProfile",
        "MSG-2024-0001",
        "2024-03-01T10:00:00Z",
        "PADPIDA2014120301U",
        "Example DSP",
        "PADPIDA2017051201Z",
        "Example Society",
    ])
}

/// Well-formed summary fields with a 75/25 split and the given declared total
pub fn summary_fields(summary_id: &str, total: &str) -> Vec<String> {
    to_owned(&[
        "SY02",
        summary_id,
        "ExampleMusicPremium",
        "SubscriptionModel",
        "OnDemandStream",
        "US",
        "2024-01-01",
        "2024-01-31",
        "Owned",
        "USD",
        "",
        "",
        "75",
        "25",
        total,
    ])
}

/// Well-formed detail fields: shares 50/25 blended 43.75, amounts 75.00 + 25.00
pub fn detail_fields(claim_id: &str, summary_id: &str) -> Vec<String> {
    to_owned(&[
        "CD01",
        claim_id,
        summary_id,
        "USRC17607839",
        "T-034.524.680-1",
        "Example Work",
        "Jane Doe|John Roe",
        "example::jd1|example::jr2",
        "Example Publishing",
        "PADPIDA2015000001A",
        "50",
        "25",
        "43.75",
        "75.00",
        "25.00",
        "100.00",
        "RatePerStream",
        "0.004",
        "1200",
    ])
}

/// Footer fields declaring line and summary counts
pub fn footer_fields(lines: usize, summaries: usize) -> Vec<String> {
    vec!["FOOT".to_string(), lines.to_string(), summaries.to_string()]
}

/// Overwrite one column, padding the line if it is too short
pub fn with_field(mut fields: Vec<String>, index: usize, value: &str) -> Vec<String> {
    if fields.len() <= index {
        fields.resize(index + 1, String::new());
    }
    fields[index] = value.to_string();
    fields
}

/// Build a `StringRecord` from fields
pub fn record(fields: &[String]) -> StringRecord {
    StringRecord::from(fields.to_vec())
}

/// Join fields into one tab-delimited line
pub fn line(fields: &[String]) -> String {
    fields.join("\t")
}

/// Header, one summary (total 100.00), one matching detail and a footer
pub fn minimal_file() -> String {
    [
        line(&header_fields()),
        line(&summary_fields("SR-1", "100.00")),
        line(&detail_fields("CLM-1", "SR-1")),
        line(&footer_fields(4, 1)),
    ]
    .join("\n")
}

/// Helper to create a temporary file with given content
pub fn create_temp_file(content: &str) -> NamedTempFile {
    let mut temp_file = NamedTempFile::new().unwrap();
    writeln!(temp_file, "{}", content).unwrap();
    temp_file
}

fn to_owned(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}
