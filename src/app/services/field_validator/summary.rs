//! Summary record rules

use rust_decimal::Decimal;

use super::rules::FindingCollector;
use crate::app::models::{Finding, FindingKind, RecordKind, SummaryRecord};
use crate::config::ValidatorConfig;
use crate::constants::fields;

/// Validate a summary record
pub fn validate_summary(summary: &SummaryRecord, config: &ValidatorConfig) -> Vec<Finding> {
    let mut rules = FindingCollector::new(RecordKind::Summary, summary.line);
    let allowed = &config.allowed_values;

    rules.fixed_value(&summary.record_type, RecordKind::Summary.accepted_tags());
    rules.malformed_numbers(&summary.malformed);

    rules.mandatory(fields::SUMMARY_RECORD_ID, summary.summary_id.as_deref());

    let description = rules.mandatory(
        fields::SERVICE_DESCRIPTION,
        summary.service_description.as_deref(),
    );
    rules.escaping(fields::SERVICE_DESCRIPTION, description);
    if description.is_some_and(|d| d.chars().any(char::is_whitespace)) {
        rules.warning(
            FindingKind::Advisory,
            fields::SERVICE_DESCRIPTION,
            "ServiceDescription should not contain whitespace",
        );
    }

    let model = rules.mandatory(fields::COMMERCIAL_MODEL, summary.commercial_model.as_deref());
    rules.allowed(fields::COMMERCIAL_MODEL, model, &allowed.commercial_models);

    let use_type = rules.mandatory(fields::USE_TYPE, summary.use_type.as_deref());
    rules.allowed(fields::USE_TYPE, use_type, &allowed.use_types);

    let territory = rules.mandatory(fields::TERRITORY, summary.territory.as_deref());
    rules.allowed(fields::TERRITORY, territory, &allowed.territories);

    rules.allowed(
        fields::CLAIM_BASIS,
        summary.claim_basis.as_deref(),
        &allowed.claim_bases,
    );

    // Claim period
    let start = rules.mandatory(fields::START_OF_PERIOD, summary.start_of_period.as_deref());
    let start = rules.date(fields::START_OF_PERIOD, start);
    let end = rules.mandatory(fields::END_OF_PERIOD, summary.end_of_period.as_deref());
    let end = rules.date(fields::END_OF_PERIOD, end);
    rules.date_range(start, end);

    // Currencies
    let reporting = rules.mandatory(
        fields::CURRENCY_OF_REPORTING,
        summary.currency_of_reporting.as_deref(),
    );
    rules.allowed(fields::CURRENCY_OF_REPORTING, reporting, &allowed.currencies);
    let invoicing = summary.currency_of_invoicing.as_deref();
    rules.allowed(fields::CURRENCY_OF_INVOICING, invoicing, &allowed.currencies);
    check_exchange_rate(&mut rules, summary, reporting, invoicing);

    // Rights splits
    rules.mandatory_number(
        fields::MECHANICAL_SPLIT,
        summary.mechanical_split.is_some(),
        &summary.malformed,
    );
    rules.mandatory_number(
        fields::PERFORMING_SPLIT,
        summary.performing_split.is_some(),
        &summary.malformed,
    );
    rules.percentage(fields::MECHANICAL_SPLIT, summary.mechanical_split);
    rules.percentage(fields::PERFORMING_SPLIT, summary.performing_split);
    if let (Some(mechanical), Some(performing)) =
        (summary.mechanical_split, summary.performing_split)
    {
        match mechanical.checked_add(performing) {
            Some(sum) if sum == Decimal::ONE_HUNDRED => {}
            Some(sum) => rules.error(
                FindingKind::RangeOrSum,
                fields::SPLIT_PAIR,
                format!(
                    "MechanicalRightsSplit ({}) + PerformingRightsSplit ({}) = {}, expected 100",
                    mechanical, performing, sum
                ),
            ),
            None => rules.error(
                FindingKind::RangeOrSum,
                fields::SPLIT_PAIR,
                format!(
                    "MechanicalRightsSplit ({}) + PerformingRightsSplit ({}) overflows, expected 100",
                    mechanical, performing
                ),
            ),
        }
    }

    rules.mandatory_number(
        fields::TOTAL_CLAIMED_AMOUNT,
        summary.total_claimed_amount.is_some(),
        &summary.malformed,
    );
    rules.non_negative(fields::TOTAL_CLAIMED_AMOUNT, summary.total_claimed_amount);

    rules.into_findings()
}

/// Exchange rate is required when invoicing in a different currency and must be positive
fn check_exchange_rate(
    rules: &mut FindingCollector,
    summary: &SummaryRecord,
    reporting: Option<&str>,
    invoicing: Option<&str>,
) {
    let converts = matches!((reporting, invoicing), (Some(r), Some(i)) if r != i);
    let malformed = summary.malformed.contains(&fields::EXCHANGE_RATE);

    match summary.exchange_rate {
        None if converts && !malformed => rules.error(
            FindingKind::Schema,
            fields::EXCHANGE_RATE,
            "ExchangeRate is mandatory when CurrencyOfInvoicing differs from CurrencyOfReporting",
        ),
        Some(rate) if rate <= Decimal::ZERO => rules.error(
            FindingKind::RangeOrSum,
            fields::EXCHANGE_RATE,
            format!("ExchangeRate must be greater than 0, got {}", rate),
        ),
        _ => {}
    }
}
