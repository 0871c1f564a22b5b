//! Post-pass reconciliation of summary totals

use tracing::debug;

use super::index::ValidationIndex;
use crate::app::models::{Finding, FindingKind, RecordKind};
use crate::app::services::field_validator::within_tolerance;
use crate::config::ValidatorConfig;
use crate::constants::fields;

/// Compare each summary's declared total with what its details added up to
pub fn aggregate_totals(index: &ValidationIndex, config: &ValidatorConfig) -> Vec<Finding> {
    let mut findings = Vec::new();

    for entry in index.summaries() {
        // Missing or malformed totals are reported by the field rules
        let Some(declared) = entry.declared_total else {
            continue;
        };

        // An overflowing accumulator was reported at the detail that overflowed it
        if entry.overflowed
            || within_tolerance(declared, entry.accumulated, config.amount_tolerance)
        {
            continue;
        }

        findings.push(Finding::error(
            FindingKind::RangeOrSum,
            entry.line,
            RecordKind::Summary.label(),
            fields::TOTAL_CLAIMED_AMOUNT,
            format!(
                "Summary '{}' declares {} but its {} detail records total {} (difference {})",
                entry.display_id,
                declared,
                entry.detail_count,
                entry.accumulated,
                declared.saturating_sub(entry.accumulated).abs()
            ),
        ));
    }

    debug!(
        "Aggregated {} summaries, {} mismatches",
        index.summaries().len(),
        findings.len()
    );
    findings
}
