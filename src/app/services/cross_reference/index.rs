//! Compact cross-reference index
//!
//! Pass 1 reduces every summary to a [`SummaryIndexEntry`] and every other
//! record to a handful of counters, so memory grows with the number of
//! distinct summary identifiers rather than with file size.

use rust_decimal::Decimal;
use std::collections::{HashMap, HashSet};
use tracing::debug;

use crate::app::models::{
    DetailRecord, Finding, FindingKind, FooterRecord, HeaderRecord, RecordKind, Statistics,
    SummaryRecord, normalize_id,
};
use crate::constants::fields;

/// Reduced projection of a summary record
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryIndexEntry {
    /// Normalized identifier (index key)
    pub summary_id: String,
    /// Identifier as first written in the file
    pub display_id: String,
    pub line: usize,
    pub service_description: Option<String>,
    pub declared_total: Option<Decimal>,
    pub mechanical_split: Option<Decimal>,
    pub performing_split: Option<Decimal>,
    /// Sum of claimed amounts of resolving details; only ever grows
    pub accumulated: Decimal,
    /// Set once the running sum no longer fits; `accumulated` stays at `Decimal::MAX`
    pub overflowed: bool,
    pub detail_count: usize,
}

impl SummaryIndexEntry {
    fn from_summary(summary: &SummaryRecord, summary_id: String, display_id: &str) -> Self {
        Self {
            summary_id,
            display_id: display_id.to_string(),
            line: summary.line,
            service_description: summary.service_description.clone(),
            declared_total: summary.total_claimed_amount,
            mechanical_split: summary.mechanical_split,
            performing_split: summary.performing_split,
            accumulated: Decimal::ZERO,
            overflowed: false,
            detail_count: 0,
        }
    }

    /// Add one resolving detail's claimed amount
    ///
    /// Negative amounts are reported by the detail rules and only counted.
    pub fn accumulate(&mut self, amount: Decimal) {
        self.detail_count += 1;
        if amount < Decimal::ZERO {
            return;
        }

        match self.accumulated.checked_add(amount) {
            Some(total) => self.accumulated = total,
            None => {
                self.accumulated = Decimal::MAX;
                self.overflowed = true;
            }
        }
    }
}

/// Per-run index consumed by pass 2 and the post-pass checks
#[derive(Debug, Default)]
pub struct ValidationIndex {
    entries: Vec<SummaryIndexEntry>,
    by_id: HashMap<String, usize>,
    claim_ids: HashSet<String>,
    summary_ids: HashSet<String>,

    header: Option<HeaderRecord>,
    footer: Option<FooterRecord>,

    pub header_count: usize,
    pub footer_count: usize,
    pub summary_count: usize,
    pub detail_count: usize,
    pub ignored_count: usize,
    pub unknown_count: usize,
    /// Record lines seen, including ignored, unknown and undecodable ones
    pub total_lines: usize,
    /// Blank and comment lines
    pub skipped_lines: usize,
    pub first_record_line: Option<usize>,
    pub last_record_line: Option<usize>,
}

impl ValidationIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count a record line and track its position
    pub fn note_record_line(&mut self, line: usize) {
        self.total_lines += 1;
        if self.first_record_line.is_none() {
            self.first_record_line = Some(line);
        }
        self.last_record_line = Some(line);
    }

    pub fn note_skipped_line(&mut self) {
        self.skipped_lines += 1;
    }

    pub fn note_ignored(&mut self) {
        self.ignored_count += 1;
    }

    pub fn note_unknown(&mut self) {
        self.unknown_count += 1;
    }

    /// Keep the first header; every later one is a structural error
    pub fn register_header(&mut self, header: HeaderRecord) -> Option<Finding> {
        self.header_count += 1;
        if let Some(first) = &self.header {
            return Some(Finding::error(
                FindingKind::Structural,
                header.line,
                RecordKind::Header.label(),
                fields::RECORD_TYPE,
                format!(
                    "Additional header record; the header at line {} is used",
                    first.line
                ),
            ));
        }

        self.header = Some(header);
        None
    }

    /// Keep the first footer; every later one is a structural error
    pub fn register_footer(&mut self, footer: FooterRecord) -> Option<Finding> {
        self.footer_count += 1;
        if let Some(first) = &self.footer {
            return Some(Finding::error(
                FindingKind::Structural,
                footer.line,
                RecordKind::Footer.label(),
                fields::RECORD_TYPE,
                format!(
                    "Additional footer record; the footer at line {} is used",
                    first.line
                ),
            ));
        }

        self.footer = Some(footer);
        None
    }

    /// Reduce a summary to its index entry, first occurrence wins
    pub fn register_summary(&mut self, summary: &SummaryRecord) -> Option<Finding> {
        self.summary_count += 1;
        let display_id = summary.summary_id.as_deref()?;
        let summary_id = normalize_id(display_id);

        if !self.summary_ids.insert(summary_id.clone()) {
            let first_line = self
                .by_id
                .get(&summary_id)
                .map(|&i| self.entries[i].line)
                .unwrap_or_default();
            return Some(Finding::error(
                FindingKind::DuplicateKey,
                summary.line,
                RecordKind::Summary.label(),
                fields::SUMMARY_RECORD_ID,
                format!(
                    "Duplicate SummaryRecordId '{}' (first defined at line {})",
                    display_id, first_line
                ),
            ));
        }

        debug!("Indexed summary '{}' at line {}", display_id, summary.line);
        self.by_id.insert(summary_id.clone(), self.entries.len());
        self.entries
            .push(SummaryIndexEntry::from_summary(summary, summary_id, display_id));
        None
    }

    /// Track the claim identifier for duplicate detection only
    pub fn register_detail(&mut self, detail: &DetailRecord) -> Option<Finding> {
        self.detail_count += 1;
        let display_id = detail.claim_id.as_deref()?;

        if self.claim_ids.insert(normalize_id(display_id)) {
            return None;
        }

        Some(Finding::error(
            FindingKind::DuplicateKey,
            detail.line,
            RecordKind::Detail.label(),
            fields::CLAIM_ID,
            format!("Duplicate ClaimId '{}'", display_id),
        ))
    }

    /// Look up a summary entry by any case variant of its identifier
    pub fn summary_mut(&mut self, summary_id: &str) -> Option<&mut SummaryIndexEntry> {
        let index = *self.by_id.get(&normalize_id(summary_id))?;
        self.entries.get_mut(index)
    }

    pub fn summary(&self, summary_id: &str) -> Option<&SummaryIndexEntry> {
        let index = *self.by_id.get(&normalize_id(summary_id))?;
        self.entries.get(index)
    }

    /// Summary entries in file order
    pub fn summaries(&self) -> &[SummaryIndexEntry] {
        &self.entries
    }

    pub fn header(&self) -> Option<&HeaderRecord> {
        self.header.as_ref()
    }

    pub fn footer(&self) -> Option<&FooterRecord> {
        self.footer.as_ref()
    }

    /// Statistics derived from the counters and accumulators
    ///
    /// Severity counts are filled in when the result is assembled.
    pub fn statistics(&self) -> Statistics {
        let summary_totals = self
            .entries
            .iter()
            .map(|entry| (entry.display_id.clone(), entry.accumulated))
            .collect();
        let total_claimed_amount = self
            .entries
            .iter()
            .fold(Decimal::ZERO, |total, entry| total.saturating_add(entry.accumulated));

        Statistics {
            total_lines: self.total_lines,
            header_records: self.header_count,
            summary_records: self.summary_count,
            detail_records: self.detail_count,
            footer_records: self.footer_count,
            ignored_records: self.ignored_count,
            unknown_records: self.unknown_count,
            skipped_lines: self.skipped_lines,
            summary_totals,
            total_claimed_amount,
            ..Statistics::default()
        }
    }
}
