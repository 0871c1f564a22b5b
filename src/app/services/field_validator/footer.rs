//! Footer record rules
//!
//! Only presence and format are checked here; the declared counts are compared
//! against the index after pass 2.

use super::rules::FindingCollector;
use crate::app::models::{Finding, FooterRecord, RecordKind};
use crate::config::ValidatorConfig;
use crate::constants::fields;

/// Validate a footer record
pub fn validate_footer(footer: &FooterRecord, _config: &ValidatorConfig) -> Vec<Finding> {
    let mut rules = FindingCollector::new(RecordKind::Footer, footer.line);

    rules.fixed_value(&footer.record_type, RecordKind::Footer.accepted_tags());
    rules.malformed_numbers(&footer.malformed);
    rules.mandatory_number(
        fields::NUMBER_OF_LINES,
        footer.number_of_lines.is_some(),
        &footer.malformed,
    );
    rules.mandatory_number(
        fields::NUMBER_OF_SUMMARY_RECORDS,
        footer.number_of_summary_records.is_some(),
        &footer.malformed,
    );

    rules.into_findings()
}
