//! Field parsing utilities for claim records
//!
//! This module provides helper functions for pulling optional text, decimal,
//! integer and list values out of a record by column index. None of them fail:
//! absence is `None`, and a present-but-unparsable number is `None` plus an
//! entry in the caller's `malformed` list.

use crate::constants::LIST_DELIMITER;
use csv::StringRecord;
use rust_decimal::Decimal;
use std::str::FromStr;
use tracing::trace;

/// Get an optional field value, trimmed; empty counts as absent
pub fn get_optional_field(record: &StringRecord, index: usize) -> Option<&str> {
    record
        .get(index)
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
}

/// Get an optional field value as an owned string
pub fn parse_optional_string(record: &StringRecord, index: usize) -> Option<String> {
    get_optional_field(record, index).map(|s| s.to_string())
}

/// Parse an optional decimal field, noting unparsable values in `malformed`
pub fn parse_optional_decimal(
    record: &StringRecord,
    index: usize,
    field_name: &'static str,
    malformed: &mut Vec<&'static str>,
) -> Option<Decimal> {
    let value_str = get_optional_field(record, index)?;

    match Decimal::from_str(value_str) {
        Ok(value) => Some(value),
        Err(e) => {
            trace!("Failed to parse {} = '{}' as decimal: {}", field_name, value_str, e);
            malformed.push(field_name);
            None
        }
    }
}

/// Parse an optional non-negative integer field, noting unparsable values
pub fn parse_optional_u64(
    record: &StringRecord,
    index: usize,
    field_name: &'static str,
    malformed: &mut Vec<&'static str>,
) -> Option<u64> {
    let value_str = get_optional_field(record, index)?;

    match value_str.parse::<u64>() {
        Ok(value) => Some(value),
        Err(e) => {
            trace!("Failed to parse {} = '{}' as integer: {}", field_name, value_str, e);
            malformed.push(field_name);
            None
        }
    }
}

/// Split a list-valued field on the secondary delimiter
///
/// An absent or blank field is an empty list, never a list with one empty item.
pub fn parse_list(record: &StringRecord, index: usize) -> Vec<String> {
    match get_optional_field(record, index) {
        Some(value) => value
            .split(LIST_DELIMITER)
            .map(|item| item.trim().to_string())
            .collect(),
        None => Vec::new(),
    }
}
