//! Pass-2 cross-record checks
//!
//! Each detail reference is resolved against the index. A resolving detail
//! feeds its summary's accumulator and has its blended share checked against
//! the summary's split.

use rust_decimal::Decimal;
use tracing::trace;

use super::index::{SummaryIndexEntry, ValidationIndex};
use crate::app::models::{DetailReference, Finding, FindingKind, RecordKind};
use crate::app::services::field_validator::within_tolerance;
use crate::config::ValidatorConfig;
use crate::constants::fields;

/// Resolve one detail reference, accumulating into its summary
pub fn check_detail_reference(
    index: &mut ValidationIndex,
    reference: &DetailReference,
    config: &ValidatorConfig,
) -> Vec<Finding> {
    // A missing reference was already reported as a mandatory field
    let Some(summary_id) = reference.summary_id.as_deref() else {
        return Vec::new();
    };

    let Some(entry) = index.summary_mut(summary_id) else {
        return vec![Finding::error(
            FindingKind::Referential,
            reference.line,
            RecordKind::Detail.label(),
            fields::SUMMARY_RECORD_ID,
            format!("SummaryRecordId '{}' does not match any summary record", summary_id),
        )];
    };

    let mut findings = Vec::new();
    let overflowed = entry.overflowed;
    entry.accumulate(reference.claimed_amount);
    trace!(
        "Line {}: added {} to summary '{}'",
        reference.line, reference.claimed_amount, entry.display_id
    );

    if entry.overflowed && !overflowed {
        findings.push(Finding::error(
            FindingKind::RangeOrSum,
            reference.line,
            RecordKind::Detail.label(),
            fields::AMOUNT_TOTAL,
            format!(
                "Claimed amount {} overflows the running total of summary '{}'",
                reference.claimed_amount, entry.display_id
            ),
        ));
    }

    findings.extend(check_blended_share(entry, reference, config.share_tolerance));
    findings
}

/// Blended share expected from the detail's shares and the summary's split
///
/// `None` when the weighted sum does not fit in a `Decimal`.
pub fn expected_blended_share(
    share_mechanical: Decimal,
    share_performing: Decimal,
    mechanical_split: Decimal,
    performing_split: Decimal,
) -> Option<Decimal> {
    let mechanical = share_mechanical.checked_mul(mechanical_split)?;
    let performing = share_performing.checked_mul(performing_split)?;
    mechanical
        .checked_add(performing)?
        .checked_div(Decimal::ONE_HUNDRED)
}

fn check_blended_share(
    entry: &SummaryIndexEntry,
    reference: &DetailReference,
    tolerance: Decimal,
) -> Option<Finding> {
    let blended = reference.share_blended?;
    let (mechanical_split, performing_split) = (entry.mechanical_split?, entry.performing_split?);
    let Some(expected) = expected_blended_share(
        reference.share_mechanical?,
        reference.share_performing?,
        mechanical_split,
        performing_split,
    ) else {
        return Some(Finding::error(
            FindingKind::RangeOrSum,
            reference.line,
            RecordKind::Detail.label(),
            fields::SHARE_BLENDED,
            format!(
                "Expected RightShareBlended overflows for summary '{}' split {}/{}",
                entry.display_id, mechanical_split, performing_split
            ),
        ));
    };

    if within_tolerance(blended, expected, tolerance) {
        return None;
    }

    Some(Finding::error(
        FindingKind::RangeOrSum,
        reference.line,
        RecordKind::Detail.label(),
        fields::SHARE_BLENDED,
        format!(
            "RightShareBlended {} does not match {} expected from summary '{}' split {}/{}",
            blended,
            expected.normalize(),
            entry.display_id,
            mechanical_split,
            performing_split
        ),
    ))
}
