//! Detail record rules

use super::rules::{FindingCollector, IdFormat, within_tolerance};
use crate::app::models::{DetailRecord, Finding, FindingKind, RecordKind};
use crate::config::ValidatorConfig;
use crate::constants::fields;

/// Validate a detail record
///
/// The blended share depends on the parent summary's splits and is checked in
/// pass 2, not here.
pub fn validate_detail(detail: &DetailRecord, config: &ValidatorConfig) -> Vec<Finding> {
    let mut rules = FindingCollector::new(RecordKind::Detail, detail.line);

    rules.fixed_value(&detail.record_type, RecordKind::Detail.accepted_tags());
    rules.malformed_numbers(&detail.malformed);

    rules.mandatory(fields::CLAIM_ID, detail.claim_id.as_deref());
    rules.mandatory(fields::SUMMARY_RECORD_ID, detail.summary_id.as_deref());

    let title = rules.mandatory(fields::WORK_TITLE, detail.work_title.as_deref());
    rules.escaping(fields::WORK_TITLE, title);

    rules.identifier(fields::ISRC, detail.isrc.as_deref(), IdFormat::Isrc);
    rules.identifier(fields::ISWC, detail.iswc.as_deref(), IdFormat::Iswc);

    // Contributors
    for name in &detail.composer_author_names {
        rules.escaping(fields::COMPOSER_AUTHOR_NAMES, Some(name.as_str()));
    }
    for party_id in &detail.composer_author_party_ids {
        rules.identifier(
            fields::COMPOSER_AUTHOR_PARTY_IDS,
            Some(party_id.as_str()),
            IdFormat::Contributor,
        );
    }
    rules.list_pair(
        fields::COMPOSER_AUTHOR_NAMES,
        &detail.composer_author_names,
        fields::COMPOSER_AUTHOR_PARTY_IDS,
        &detail.composer_author_party_ids,
    );

    // Rights controller
    rules.escaping(
        fields::RIGHTS_CONTROLLER_NAME,
        detail.rights_controller_name.as_deref(),
    );
    rules.requires(
        fields::RIGHTS_CONTROLLER_NAME,
        detail.rights_controller_name.is_some(),
        fields::RIGHTS_CONTROLLER_PARTY_ID,
        detail.rights_controller_party_id.is_some(),
    );
    rules.identifier(
        fields::RIGHTS_CONTROLLER_PARTY_ID,
        detail.rights_controller_party_id.as_deref(),
        IdFormat::Party,
    );

    rules.percentage(fields::SHARE_MECHANICAL, detail.share_mechanical);
    rules.percentage(fields::SHARE_PERFORMING, detail.share_performing);
    rules.percentage(fields::SHARE_BLENDED, detail.share_blended);

    // Amounts
    rules.mandatory_number(
        fields::AMOUNT_TOTAL,
        detail.amount_total.is_some(),
        &detail.malformed,
    );
    rules.non_negative(fields::AMOUNT_MECHANICAL, detail.amount_mechanical);
    rules.non_negative(fields::AMOUNT_PERFORMING, detail.amount_performing);
    rules.non_negative(fields::AMOUNT_TOTAL, detail.amount_total);
    if let (Some(total), Some(mechanical), Some(performing)) = (
        detail.amount_total,
        detail.amount_mechanical,
        detail.amount_performing,
    ) {
        match mechanical.checked_add(performing) {
            Some(expected) if within_tolerance(total, expected, config.amount_tolerance) => {}
            Some(expected) => rules.error(
                FindingKind::RangeOrSum,
                fields::AMOUNT_TOTAL,
                format!(
                    "ClaimedAmountTotal {} does not equal ClaimedAmountMechanical {} + ClaimedAmountPerforming {} = {} (tolerance {})",
                    total, mechanical, performing, expected, config.amount_tolerance
                ),
            ),
            None => rules.error(
                FindingKind::RangeOrSum,
                fields::AMOUNT_TOTAL,
                format!(
                    "ClaimedAmountMechanical {} + ClaimedAmountPerforming {} overflows",
                    mechanical, performing
                ),
            ),
        }
    }

    rules.list_pair(
        fields::TARIFF_PARAMETER_TYPES,
        &detail.tariff_parameter_types,
        fields::TARIFF_PARAMETER_VALUES,
        &detail.tariff_parameter_values,
    );

    rules.into_findings()
}
