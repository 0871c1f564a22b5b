//! Data models for claim file validation
//!
//! This module contains the typed record structures produced by the record
//! parsers. Records are transient: the validator builds one per line, runs the
//! field rules against it and then drops it once the relevant projection has
//! been captured in the cross-reference index.

pub mod finding;
pub mod report;

use crate::constants::tags;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

pub use finding::{Finding, FindingKind, Severity};
pub use report::{Statistics, ValidationResult};

/// Normalize an identifier for case-insensitive comparison
///
/// Every index and membership set stores identifiers in this form so that
/// ordinary string equality and hashing can be used everywhere else.
pub fn normalize_id(id: &str) -> String {
    id.trim().to_uppercase()
}

// =============================================================================
// Record Kinds
// =============================================================================

/// The four supported record types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RecordKind {
    Header,
    Summary,
    Detail,
    Footer,
}

impl RecordKind {
    /// All accepted spellings of this record type's tag
    pub fn accepted_tags(&self) -> &'static [&'static str] {
        match self {
            RecordKind::Header => tags::HEADER,
            RecordKind::Summary => tags::SUMMARY,
            RecordKind::Detail => tags::DETAIL,
            RecordKind::Footer => tags::FOOTER,
        }
    }

    /// Canonical label used in findings
    pub fn label(&self) -> &'static str {
        self.accepted_tags()[0]
    }

    /// Resolve a tag to a record kind, if it is one of the accepted spellings
    pub fn from_tag(tag: &str) -> Option<Self> {
        [
            RecordKind::Header,
            RecordKind::Summary,
            RecordKind::Detail,
            RecordKind::Footer,
        ]
        .into_iter()
        .find(|kind| kind.accepted_tags().contains(&tag))
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// =============================================================================
// Typed Records
// =============================================================================

/// File header: message identity and the parties involved
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeaderRecord {
    pub line: usize,
    pub record_type: String,
    pub message_version: Option<String>,
    pub profile: Option<String>,
    pub message_id: Option<String>,
    /// Raw creation timestamp, validated by the field rules
    pub created: Option<String>,
    pub sender_party_id: Option<String>,
    pub sender_name: Option<String>,
    pub recipient_party_id: Option<String>,
    pub recipient_name: Option<String>,
    pub on_behalf_of_party_id: Option<String>,
    pub on_behalf_of_name: Option<String>,
}

/// Claim aggregation unit
///
/// Only lives for the duration of one loop iteration in pass 1; the index
/// keeps a [`SummaryIndexEntry`](crate::app::services::cross_reference::SummaryIndexEntry)
/// projection instead.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryRecord {
    pub line: usize,
    pub record_type: String,
    pub summary_id: Option<String>,
    pub service_description: Option<String>,
    pub commercial_model: Option<String>,
    pub use_type: Option<String>,
    pub territory: Option<String>,
    pub start_of_period: Option<String>,
    pub end_of_period: Option<String>,
    pub claim_basis: Option<String>,
    pub currency_of_reporting: Option<String>,
    pub currency_of_invoicing: Option<String>,
    pub exchange_rate: Option<Decimal>,
    pub mechanical_split: Option<Decimal>,
    pub performing_split: Option<Decimal>,
    pub total_claimed_amount: Option<Decimal>,
    /// Numeric fields that were present but could not be parsed
    pub malformed: Vec<&'static str>,
}

/// One individual claim line
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetailRecord {
    pub line: usize,
    pub record_type: String,
    pub claim_id: Option<String>,
    pub summary_id: Option<String>,
    pub isrc: Option<String>,
    pub iswc: Option<String>,
    pub work_title: Option<String>,
    pub composer_author_names: Vec<String>,
    pub composer_author_party_ids: Vec<String>,
    pub rights_controller_name: Option<String>,
    pub rights_controller_party_id: Option<String>,
    pub share_mechanical: Option<Decimal>,
    pub share_performing: Option<Decimal>,
    pub share_blended: Option<Decimal>,
    pub amount_mechanical: Option<Decimal>,
    pub amount_performing: Option<Decimal>,
    pub amount_total: Option<Decimal>,
    pub tariff_parameter_types: Vec<String>,
    pub tariff_parameter_values: Vec<String>,
    pub number_of_usages: Option<u64>,
    pub malformed: Vec<&'static str>,
}

impl DetailRecord {
    /// Amount this claim contributes to its summary's running total
    pub fn claimed_amount(&self) -> Decimal {
        claimed_amount(
            self.amount_total,
            self.amount_mechanical,
            self.amount_performing,
        )
    }
}

/// File footer: declared checksums for the whole file
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FooterRecord {
    pub line: usize,
    pub record_type: String,
    pub number_of_lines: Option<u64>,
    pub number_of_summary_records: Option<u64>,
    pub malformed: Vec<&'static str>,
}

/// The slice of a detail line that pass 2 needs
///
/// Pass 2 never builds a full [`DetailRecord`]; it only pulls the reference,
/// the three shares and the claimed amount.
#[derive(Debug, Clone, PartialEq)]
pub struct DetailReference {
    pub line: usize,
    pub summary_id: Option<String>,
    pub share_mechanical: Option<Decimal>,
    pub share_performing: Option<Decimal>,
    pub share_blended: Option<Decimal>,
    pub claimed_amount: Decimal,
}

/// Total claimed amount, falling back to whichever components parsed
pub fn claimed_amount(
    total: Option<Decimal>,
    mechanical: Option<Decimal>,
    performing: Option<Decimal>,
) -> Decimal {
    match total {
        Some(total) => total,
        None => mechanical
            .unwrap_or_default()
            .saturating_add(performing.unwrap_or_default()),
    }
}
