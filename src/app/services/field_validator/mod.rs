//! Field-level validation service
//!
//! Applies the per-record rule sets to typed records. Each validator is a pure
//! function of the record and the configuration: it never sees other records,
//! so cross-record rules live in the cross-reference service instead.
//!
//! Every rule of a record is evaluated, so one line can carry several
//! findings.
//!
//! # Example
//!
//! ```
//! use claim_validator::ValidatorConfig;
//! use claim_validator::app::models::FooterRecord;
//! use claim_validator::app::services::field_validator::validate_footer;
//!
//! let footer = FooterRecord {
//!     line: 10,
//!     record_type: "FOOT".to_string(),
//!     number_of_lines: None,
//!     number_of_summary_records: Some(2),
//!     malformed: Vec::new(),
//! };
//! let findings = validate_footer(&footer, &ValidatorConfig::default());
//! assert_eq!(findings.len(), 1);
//! assert_eq!(findings[0].field, "NumberOfLinesInFile");
//! ```

pub mod detail;
pub mod footer;
pub mod header;
pub mod rules;
pub mod summary;

#[cfg(test)]
pub mod tests;

pub use detail::validate_detail;
pub use footer::validate_footer;
pub use header::validate_header;
pub use rules::{FindingCollector, IdFormat, PartialDate, parse_partial_date, within_tolerance};
pub use summary::validate_summary;
