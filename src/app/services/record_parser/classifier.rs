//! Record-type classification
//!
//! The record type is the first tab-separated field of a line. Classification
//! happens once per line; everything downstream matches on [`LineClass`].

use crate::app::models::RecordKind;
use crate::constants::{COMMENT_MARKER, tags};
use csv::StringRecord;

/// Outcome of classifying one line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineClass {
    /// Blank line or `#` comment; not a record
    Skip,
    /// One of the four supported record types
    Record(RecordKind),
    /// Recognized but out-of-scope tag family, counted only
    Ignored,
    /// Any other tag
    Unknown(String),
}

/// Classify a line by its first field
pub fn classify(record: &StringRecord) -> LineClass {
    if is_blank(record) {
        return LineClass::Skip;
    }

    let first = record.get(0).unwrap_or_default();
    if first.trim_start().starts_with(COMMENT_MARKER) {
        return LineClass::Skip;
    }

    let tag = first.trim();
    if let Some(kind) = RecordKind::from_tag(tag) {
        return LineClass::Record(kind);
    }

    if tag.starts_with(tags::IGNORED_PREFIX) {
        return LineClass::Ignored;
    }

    LineClass::Unknown(tag.to_string())
}

fn is_blank(record: &StringRecord) -> bool {
    record.iter().all(|field| field.trim().is_empty())
}
