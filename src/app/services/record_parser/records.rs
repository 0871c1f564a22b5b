//! Typed record parsers
//!
//! One pure function per record type, mapping a split line and its line
//! number to a typed record. Column positions are fixed by the file format.

use csv::StringRecord;

use super::field_parsers::{
    get_optional_field, parse_list, parse_optional_decimal, parse_optional_string,
    parse_optional_u64,
};
use crate::app::models::{
    DetailRecord, DetailReference, FooterRecord, HeaderRecord, SummaryRecord, claimed_amount,
};
use crate::constants::fields;

/// Column positions for header records
pub mod header_columns {
    pub const RECORD_TYPE: usize = 0;
    pub const MESSAGE_VERSION: usize = 1;
    pub const PROFILE: usize = 2;
    pub const MESSAGE_ID: usize = 3;
    pub const MESSAGE_CREATED: usize = 4;
    pub const SENDER_PARTY_ID: usize = 5;
    pub const SENDER_NAME: usize = 6;
    pub const RECIPIENT_PARTY_ID: usize = 7;
    pub const RECIPIENT_NAME: usize = 8;
    pub const ON_BEHALF_OF_PARTY_ID: usize = 9;
    pub const ON_BEHALF_OF_NAME: usize = 10;
}

/// Column positions for summary records
pub mod summary_columns {
    pub const RECORD_TYPE: usize = 0;
    pub const SUMMARY_RECORD_ID: usize = 1;
    pub const SERVICE_DESCRIPTION: usize = 2;
    pub const COMMERCIAL_MODEL: usize = 3;
    pub const USE_TYPE: usize = 4;
    pub const TERRITORY: usize = 5;
    pub const START_OF_PERIOD: usize = 6;
    pub const END_OF_PERIOD: usize = 7;
    pub const CLAIM_BASIS: usize = 8;
    pub const CURRENCY_OF_REPORTING: usize = 9;
    pub const CURRENCY_OF_INVOICING: usize = 10;
    pub const EXCHANGE_RATE: usize = 11;
    pub const MECHANICAL_SPLIT: usize = 12;
    pub const PERFORMING_SPLIT: usize = 13;
    pub const TOTAL_CLAIMED_AMOUNT: usize = 14;
}

/// Column positions for detail records
pub mod detail_columns {
    pub const RECORD_TYPE: usize = 0;
    pub const CLAIM_ID: usize = 1;
    pub const SUMMARY_RECORD_ID: usize = 2;
    pub const ISRC: usize = 3;
    pub const ISWC: usize = 4;
    pub const WORK_TITLE: usize = 5;
    pub const COMPOSER_AUTHOR_NAMES: usize = 6;
    pub const COMPOSER_AUTHOR_PARTY_IDS: usize = 7;
    pub const RIGHTS_CONTROLLER_NAME: usize = 8;
    pub const RIGHTS_CONTROLLER_PARTY_ID: usize = 9;
    pub const SHARE_MECHANICAL: usize = 10;
    pub const SHARE_PERFORMING: usize = 11;
    pub const SHARE_BLENDED: usize = 12;
    pub const AMOUNT_MECHANICAL: usize = 13;
    pub const AMOUNT_PERFORMING: usize = 14;
    pub const AMOUNT_TOTAL: usize = 15;
    pub const TARIFF_PARAMETER_TYPES: usize = 16;
    pub const TARIFF_PARAMETER_VALUES: usize = 17;
    pub const NUMBER_OF_USAGES: usize = 18;
}

/// Column positions for footer records
pub mod footer_columns {
    pub const RECORD_TYPE: usize = 0;
    pub const NUMBER_OF_LINES: usize = 1;
    pub const NUMBER_OF_SUMMARY_RECORDS: usize = 2;
}

fn record_type(record: &StringRecord) -> String {
    get_optional_field(record, 0).unwrap_or_default().to_string()
}

/// Parse a header line
pub fn parse_header(record: &StringRecord, line: usize) -> HeaderRecord {
    use header_columns::*;

    HeaderRecord {
        line,
        record_type: record_type(record),
        message_version: parse_optional_string(record, MESSAGE_VERSION),
        profile: parse_optional_string(record, PROFILE),
        message_id: parse_optional_string(record, MESSAGE_ID),
        created: parse_optional_string(record, MESSAGE_CREATED),
        sender_party_id: parse_optional_string(record, SENDER_PARTY_ID),
        sender_name: parse_optional_string(record, SENDER_NAME),
        recipient_party_id: parse_optional_string(record, RECIPIENT_PARTY_ID),
        recipient_name: parse_optional_string(record, RECIPIENT_NAME),
        on_behalf_of_party_id: parse_optional_string(record, ON_BEHALF_OF_PARTY_ID),
        on_behalf_of_name: parse_optional_string(record, ON_BEHALF_OF_NAME),
    }
}

/// Parse a summary line
pub fn parse_summary(record: &StringRecord, line: usize) -> SummaryRecord {
    use summary_columns::*;

    let mut malformed = Vec::new();
    let exchange_rate =
        parse_optional_decimal(record, EXCHANGE_RATE, fields::EXCHANGE_RATE, &mut malformed);
    let mechanical_split = parse_optional_decimal(
        record,
        MECHANICAL_SPLIT,
        fields::MECHANICAL_SPLIT,
        &mut malformed,
    );
    let performing_split = parse_optional_decimal(
        record,
        PERFORMING_SPLIT,
        fields::PERFORMING_SPLIT,
        &mut malformed,
    );
    let total_claimed_amount = parse_optional_decimal(
        record,
        TOTAL_CLAIMED_AMOUNT,
        fields::TOTAL_CLAIMED_AMOUNT,
        &mut malformed,
    );

    SummaryRecord {
        line,
        record_type: record_type(record),
        summary_id: parse_optional_string(record, SUMMARY_RECORD_ID),
        service_description: parse_optional_string(record, SERVICE_DESCRIPTION),
        commercial_model: parse_optional_string(record, COMMERCIAL_MODEL),
        use_type: parse_optional_string(record, USE_TYPE),
        territory: parse_optional_string(record, TERRITORY),
        start_of_period: parse_optional_string(record, START_OF_PERIOD),
        end_of_period: parse_optional_string(record, END_OF_PERIOD),
        claim_basis: parse_optional_string(record, CLAIM_BASIS),
        currency_of_reporting: parse_optional_string(record, CURRENCY_OF_REPORTING),
        currency_of_invoicing: parse_optional_string(record, CURRENCY_OF_INVOICING),
        exchange_rate,
        mechanical_split,
        performing_split,
        total_claimed_amount,
        malformed,
    }
}

/// Parse a detail line
pub fn parse_detail(record: &StringRecord, line: usize) -> DetailRecord {
    use detail_columns::*;

    let mut malformed = Vec::new();
    let share_mechanical = parse_optional_decimal(
        record,
        SHARE_MECHANICAL,
        fields::SHARE_MECHANICAL,
        &mut malformed,
    );
    let share_performing = parse_optional_decimal(
        record,
        SHARE_PERFORMING,
        fields::SHARE_PERFORMING,
        &mut malformed,
    );
    let share_blended =
        parse_optional_decimal(record, SHARE_BLENDED, fields::SHARE_BLENDED, &mut malformed);
    let amount_mechanical = parse_optional_decimal(
        record,
        AMOUNT_MECHANICAL,
        fields::AMOUNT_MECHANICAL,
        &mut malformed,
    );
    let amount_performing = parse_optional_decimal(
        record,
        AMOUNT_PERFORMING,
        fields::AMOUNT_PERFORMING,
        &mut malformed,
    );
    let amount_total =
        parse_optional_decimal(record, AMOUNT_TOTAL, fields::AMOUNT_TOTAL, &mut malformed);
    let number_of_usages = parse_optional_u64(
        record,
        NUMBER_OF_USAGES,
        fields::NUMBER_OF_USAGES,
        &mut malformed,
    );

    DetailRecord {
        line,
        record_type: record_type(record),
        claim_id: parse_optional_string(record, CLAIM_ID),
        summary_id: parse_optional_string(record, SUMMARY_RECORD_ID),
        isrc: parse_optional_string(record, ISRC),
        iswc: parse_optional_string(record, ISWC),
        work_title: parse_optional_string(record, WORK_TITLE),
        composer_author_names: parse_list(record, COMPOSER_AUTHOR_NAMES),
        composer_author_party_ids: parse_list(record, COMPOSER_AUTHOR_PARTY_IDS),
        rights_controller_name: parse_optional_string(record, RIGHTS_CONTROLLER_NAME),
        rights_controller_party_id: parse_optional_string(record, RIGHTS_CONTROLLER_PARTY_ID),
        share_mechanical,
        share_performing,
        share_blended,
        amount_mechanical,
        amount_performing,
        amount_total,
        tariff_parameter_types: parse_list(record, TARIFF_PARAMETER_TYPES),
        tariff_parameter_values: parse_list(record, TARIFF_PARAMETER_VALUES),
        number_of_usages,
        malformed,
    }
}

/// Parse only what pass 2 needs from a detail line
///
/// Malformed numbers were already reported in pass 1, so they are dropped here.
pub fn parse_detail_reference(record: &StringRecord, line: usize) -> DetailReference {
    use detail_columns::*;

    let mut ignored = Vec::new();
    let mut decimal = |index: usize, name: &'static str| {
        parse_optional_decimal(record, index, name, &mut ignored)
    };

    let share_mechanical = decimal(SHARE_MECHANICAL, fields::SHARE_MECHANICAL);
    let share_performing = decimal(SHARE_PERFORMING, fields::SHARE_PERFORMING);
    let share_blended = decimal(SHARE_BLENDED, fields::SHARE_BLENDED);
    let amount_mechanical = decimal(AMOUNT_MECHANICAL, fields::AMOUNT_MECHANICAL);
    let amount_performing = decimal(AMOUNT_PERFORMING, fields::AMOUNT_PERFORMING);
    let amount_total = decimal(AMOUNT_TOTAL, fields::AMOUNT_TOTAL);

    DetailReference {
        line,
        summary_id: parse_optional_string(record, SUMMARY_RECORD_ID),
        share_mechanical,
        share_performing,
        share_blended,
        claimed_amount: claimed_amount(amount_total, amount_mechanical, amount_performing),
    }
}

/// Parse a footer line
pub fn parse_footer(record: &StringRecord, line: usize) -> FooterRecord {
    use footer_columns::*;

    let mut malformed = Vec::new();
    let number_of_lines =
        parse_optional_u64(record, NUMBER_OF_LINES, fields::NUMBER_OF_LINES, &mut malformed);
    let number_of_summary_records = parse_optional_u64(
        record,
        NUMBER_OF_SUMMARY_RECORDS,
        fields::NUMBER_OF_SUMMARY_RECORDS,
        &mut malformed,
    );

    FooterRecord {
        line,
        record_type: record_type(record),
        number_of_lines,
        number_of_summary_records,
        malformed,
    }
}
