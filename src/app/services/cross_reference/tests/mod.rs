//! Test utilities for the cross-reference service

use crate::app::models::{DetailReference, SummaryRecord};
use crate::app::services::cross_reference::ValidationIndex;
use crate::app::services::record_parser::tests::{record, summary_fields, with_field};
use crate::app::services::record_parser::parse_summary;
use crate::app::services::record_parser::records::summary_columns;
use rust_decimal::Decimal;


pub fn summary(summary_id: &str, total: &str, line: usize) -> SummaryRecord {
    parse_summary(&record(&summary_fields(summary_id, total)), line)
}

pub fn summary_with_split(summary_id: &str, mechanical: &str, performing: &str) -> SummaryRecord {
    let fields = with_field(
        summary_fields(summary_id, "100.00"),
        summary_columns::MECHANICAL_SPLIT,
        mechanical,
    );
    let fields = with_field(fields, summary_columns::PERFORMING_SPLIT, performing);
    parse_summary(&record(&fields), 2)
}

/// Reference with shares 50/25 and the given blended share
pub fn reference(summary_id: &str, line: usize, amount: Decimal, blended: Decimal) -> DetailReference {
    DetailReference {
        line,
        summary_id: Some(summary_id.to_string()),
        share_mechanical: Some(Decimal::from(50)),
        share_performing: Some(Decimal::from(25)),
        share_blended: Some(blended),
        claimed_amount: amount,
    }
}

/// Index with summaries registered in order, one per line starting at 2
pub fn index_with(summaries: &[(&str, &str)]) -> ValidationIndex {
    let mut index = ValidationIndex::new();
    for (offset, (summary_id, total)) in summaries.iter().enumerate() {
        let line = offset + 2;
        index.note_record_line(line);
        assert!(index.register_summary(&summary(summary_id, total, line)).is_none());
    }
    index
}
