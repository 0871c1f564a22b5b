//! Rule primitives shared by the per-record validators
//!
//! [`FindingCollector`] accumulates findings for one record. Every rule method
//! records its own finding and returns, so all rules run for every record.

use chrono::{DateTime, FixedOffset, NaiveDate};
use regex::Regex;
use rust_decimal::Decimal;
use std::sync::LazyLock;

use crate::app::models::{Finding, FindingKind, RecordKind, Severity};
use crate::constants::{ESCAPE_CHAR, ESCAPE_RUN_MULTIPLE, fields, patterns};

static DPID_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(patterns::DPID).expect("valid DPID pattern"));
static NAMESPACED_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(patterns::NAMESPACED_PARTY_ID).expect("valid namespaced party pattern")
});
static ISNI_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(patterns::ISNI).expect("valid ISNI pattern"));
static ISRC_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(patterns::ISRC).expect("valid ISRC pattern"));
static ISWC_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(patterns::ISWC).expect("valid ISWC pattern"));

static DATE_DAY_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{4})-(\d{2})-(\d{2})$").expect("valid date pattern"));
static DATE_MONTH_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{4})-(\d{2})$").expect("valid month pattern"));
static DATE_YEAR_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{4})$").expect("valid year pattern"));
static DATE_REGIONAL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{2})/(\d{2})/(\d{4})$").expect("valid regional pattern"));

// =============================================================================
// Identifier Formats
// =============================================================================

/// Structural identifier formats checked by [`FindingCollector::identifier`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdFormat {
    Dpid,
    /// DPID or `namespace::value`
    Party,
    /// ISNI or `namespace::value`
    Contributor,
    Isrc,
    Iswc,
}

impl IdFormat {
    pub fn matches(&self, value: &str) -> bool {
        match self {
            IdFormat::Dpid => DPID_REGEX.is_match(value),
            IdFormat::Party => DPID_REGEX.is_match(value) || NAMESPACED_REGEX.is_match(value),
            IdFormat::Contributor => {
                ISNI_REGEX.is_match(value) || NAMESPACED_REGEX.is_match(value)
            }
            IdFormat::Isrc => ISRC_REGEX.is_match(value),
            IdFormat::Iswc => ISWC_REGEX.is_match(value),
        }
    }

    fn description(&self) -> &'static str {
        match self {
            IdFormat::Dpid => "a DPID (PADPIDA followed by 11 characters)",
            IdFormat::Party => "a DPID or a namespace::value party identifier",
            IdFormat::Contributor => "an ISNI or a namespace::value party identifier",
            IdFormat::Isrc => "an ISRC (CCXXXYYNNNNN)",
            IdFormat::Iswc => "an ISWC (T-123.456.789-0 or T1234567890)",
        }
    }
}

// =============================================================================
// Dates
// =============================================================================

/// A calendar date at day, month or year precision
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PartialDate {
    Day(NaiveDate),
    Month { year: i32, month: u32 },
    Year(i32),
}

impl PartialDate {
    /// First day covered, used when the date starts a range
    pub fn first_day(&self) -> Option<NaiveDate> {
        match *self {
            PartialDate::Day(date) => Some(date),
            PartialDate::Month { year, month } => NaiveDate::from_ymd_opt(year, month, 1),
            PartialDate::Year(year) => NaiveDate::from_ymd_opt(year, 1, 1),
        }
    }

    /// Last day covered, used when the date ends a range
    pub fn last_day(&self) -> Option<NaiveDate> {
        match *self {
            PartialDate::Day(date) => Some(date),
            PartialDate::Month { year, month } => {
                let (next_year, next_month) = if month == 12 {
                    (year + 1, 1)
                } else {
                    (year, month + 1)
                };
                NaiveDate::from_ymd_opt(next_year, next_month, 1).and_then(|d| d.pred_opt())
            }
            PartialDate::Year(year) => NaiveDate::from_ymd_opt(year, 12, 31),
        }
    }
}

fn capture_number<T: std::str::FromStr>(caps: &regex::Captures<'_>, index: usize) -> Option<T> {
    caps.get(index).and_then(|m| m.as_str().parse().ok())
}

/// Parse `YYYY-MM-DD`, `YYYY-MM`, `YYYY` or `DD/MM/YYYY`
pub fn parse_partial_date(value: &str) -> Option<PartialDate> {
    if let Some(caps) = DATE_DAY_REGEX.captures(value) {
        let date = NaiveDate::from_ymd_opt(
            capture_number(&caps, 1)?,
            capture_number(&caps, 2)?,
            capture_number(&caps, 3)?,
        )?;
        return Some(PartialDate::Day(date));
    }

    if let Some(caps) = DATE_MONTH_REGEX.captures(value) {
        let year: i32 = capture_number(&caps, 1)?;
        let month: u32 = capture_number(&caps, 2)?;
        return (1..=12)
            .contains(&month)
            .then_some(PartialDate::Month { year, month });
    }

    if let Some(caps) = DATE_YEAR_REGEX.captures(value) {
        return Some(PartialDate::Year(capture_number(&caps, 1)?));
    }

    if let Some(caps) = DATE_REGIONAL_REGEX.captures(value) {
        let date = NaiveDate::from_ymd_opt(
            capture_number(&caps, 3)?,
            capture_number(&caps, 2)?,
            capture_number(&caps, 1)?,
        )?;
        return Some(PartialDate::Day(date));
    }

    None
}

/// Parse a timezone-qualified RFC 3339 timestamp
pub fn parse_timestamp(value: &str) -> Option<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc3339(value).ok()
}

// =============================================================================
// Text and Arithmetic Helpers
// =============================================================================

/// Every run of the escape character must be a multiple of four long
pub fn escape_runs_valid(value: &str) -> bool {
    let mut run = 0usize;
    for c in value.chars() {
        if c == ESCAPE_CHAR {
            run += 1;
        } else {
            if run % ESCAPE_RUN_MULTIPLE != 0 {
                return false;
            }
            run = 0;
        }
    }
    run % ESCAPE_RUN_MULTIPLE == 0
}

/// Tolerance-based equality for amounts and shares (inclusive)
///
/// A difference too large to represent is never within tolerance.
pub fn within_tolerance(actual: Decimal, expected: Decimal, tolerance: Decimal) -> bool {
    actual
        .checked_sub(expected)
        .is_some_and(|difference| difference.abs() <= tolerance)
}

// =============================================================================
// Finding Collector
// =============================================================================

/// Collects findings for a single record
#[derive(Debug)]
pub struct FindingCollector {
    line: usize,
    record_type: &'static str,
    findings: Vec<Finding>,
}

impl FindingCollector {
    pub fn new(kind: RecordKind, line: usize) -> Self {
        Self {
            line,
            record_type: kind.label(),
            findings: Vec::new(),
        }
    }

    pub fn push(
        &mut self,
        severity: Severity,
        kind: FindingKind,
        field: &str,
        message: impl Into<String>,
    ) {
        self.findings.push(Finding::new(
            severity,
            kind,
            self.line,
            self.record_type,
            field,
            message,
        ));
    }

    pub fn error(&mut self, kind: FindingKind, field: &str, message: impl Into<String>) {
        self.push(Severity::Error, kind, field, message);
    }

    pub fn warning(&mut self, kind: FindingKind, field: &str, message: impl Into<String>) {
        self.push(Severity::Warning, kind, field, message);
    }

    pub fn into_findings(self) -> Vec<Finding> {
        self.findings
    }

    /// Record tag must be one of the accepted spellings
    pub fn fixed_value(&mut self, value: &str, accepted: &[&str]) {
        if !accepted.contains(&value) {
            self.error(
                FindingKind::Schema,
                fields::RECORD_TYPE,
                format!(
                    "Record type '{}' must be one of: {}",
                    value,
                    accepted.join(", ")
                ),
            );
        }
    }

    /// Field must be present; passes the value through for further checks
    pub fn mandatory<'a>(&mut self, field: &str, value: Option<&'a str>) -> Option<&'a str> {
        if value.is_none() {
            self.error(
                FindingKind::Schema,
                field,
                format!("{} is mandatory", field),
            );
        }
        value
    }

    /// Numeric field must be present, unless it was present but malformed
    pub fn mandatory_number(&mut self, field: &'static str, present: bool, malformed: &[&str]) {
        if !present && !malformed.contains(&field) {
            self.error(
                FindingKind::Schema,
                field,
                format!("{} is mandatory", field),
            );
        }
    }

    /// One finding per numeric field that failed to parse
    pub fn malformed_numbers(&mut self, malformed: &[&'static str]) {
        for field in malformed {
            self.error(
                FindingKind::Schema,
                field,
                format!("{} is not a valid number", field),
            );
        }
    }

    /// Identifier must match its structural format
    pub fn identifier(&mut self, field: &str, value: Option<&str>, format: IdFormat) {
        if let Some(value) = value {
            if !format.matches(value) {
                self.error(
                    FindingKind::Schema,
                    field,
                    format!("'{}' is not {}", value, format.description()),
                );
            }
        }
    }

    /// Value must belong to the allowed set
    pub fn allowed(&mut self, field: &str, value: Option<&str>, allowed: &[String]) {
        if let Some(value) = value {
            if !allowed.iter().any(|a| a == value) {
                self.error(
                    FindingKind::Schema,
                    field,
                    format!("'{}' is not an allowed {}", value, field),
                );
            }
        }
    }

    /// Percentage must lie in [0, 100]
    pub fn percentage(&mut self, field: &str, value: Option<Decimal>) {
        if let Some(value) = value {
            if value < Decimal::ZERO || value > Decimal::ONE_HUNDRED {
                self.error(
                    FindingKind::RangeOrSum,
                    field,
                    format!("{} must be between 0 and 100, got {}", field, value),
                );
            }
        }
    }

    /// Amount must not be negative
    pub fn non_negative(&mut self, field: &str, value: Option<Decimal>) {
        if let Some(value) = value {
            if value < Decimal::ZERO {
                self.error(
                    FindingKind::RangeOrSum,
                    field,
                    format!("{} must not be negative, got {}", field, value),
                );
            }
        }
    }

    /// Escape character runs must be well formed
    pub fn escaping(&mut self, field: &str, value: Option<&str>) {
        if let Some(value) = value {
            if !escape_runs_valid(value) {
                self.error(
                    FindingKind::Schema,
                    field,
                    format!(
                        "{} contains a run of '{}' that is not a multiple of {}",
                        field, ESCAPE_CHAR, ESCAPE_RUN_MULTIPLE
                    ),
                );
            }
        }
    }

    /// Field must parse as a calendar date
    pub fn date(&mut self, field: &str, value: Option<&str>) -> Option<PartialDate> {
        let value = value?;
        let parsed = parse_partial_date(value);
        if parsed.is_none() {
            self.error(
                FindingKind::Schema,
                field,
                format!(
                    "'{}' is not a valid date (YYYY-MM-DD, YYYY-MM, YYYY or DD/MM/YYYY)",
                    value
                ),
            );
        }
        parsed
    }

    /// Field must parse as a timezone-qualified timestamp
    pub fn timestamp(&mut self, field: &str, value: Option<&str>) {
        if let Some(value) = value {
            if parse_timestamp(value).is_none() {
                self.error(
                    FindingKind::Schema,
                    field,
                    format!(
                        "'{}' is not a valid timestamp with timezone (e.g. 2024-03-01T10:00:00Z)",
                        value
                    ),
                );
            }
        }
    }

    /// Start must not be after end when both parsed
    pub fn date_range(&mut self, start: Option<PartialDate>, end: Option<PartialDate>) {
        let (Some(start), Some(end)) = (start, end) else {
            return;
        };
        if let (Some(first), Some(last)) = (start.first_day(), end.last_day()) {
            if first > last {
                self.error(
                    FindingKind::Schema,
                    fields::PERIOD_RANGE,
                    format!("Start of period {} is after end of period {}", first, last),
                );
            }
        }
    }

    /// `dependent` is required whenever `trigger` is present
    pub fn requires(
        &mut self,
        trigger_field: &str,
        trigger_present: bool,
        dependent_field: &str,
        dependent_present: bool,
    ) {
        if trigger_present && !dependent_present {
            self.error(
                FindingKind::Schema,
                dependent_field,
                format!("{} is mandatory when {} is given", dependent_field, trigger_field),
            );
        }
    }

    /// Paired list fields should have equal cardinality
    ///
    /// Values without their primary list is an Error; a missing or shorter
    /// companion list is only a Warning.
    pub fn list_pair(
        &mut self,
        primary_field: &str,
        primary: &[String],
        secondary_field: &str,
        secondary: &[String],
    ) {
        match (primary.is_empty(), secondary.is_empty()) {
            (true, true) => {}
            (true, false) => self.error(
                FindingKind::Schema,
                primary_field,
                format!(
                    "{} has {} entries but {} is empty",
                    secondary_field,
                    secondary.len(),
                    primary_field
                ),
            ),
            (false, true) => self.warning(
                FindingKind::Advisory,
                secondary_field,
                format!(
                    "{} is empty for {} {} entries",
                    secondary_field,
                    primary.len(),
                    primary_field
                ),
            ),
            (false, false) if primary.len() != secondary.len() => self.warning(
                FindingKind::Advisory,
                format!("{}/{}", primary_field, secondary_field).as_str(),
                format!(
                    "{} has {} entries but {} has {}",
                    primary_field,
                    primary.len(),
                    secondary_field,
                    secondary.len()
                ),
            ),
            (false, false) => {}
        }
    }
}
