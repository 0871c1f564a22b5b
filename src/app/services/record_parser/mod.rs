//! Record classifier and typed record parsers for claim files
//!
//! This module turns raw tab-delimited lines into typed records. Parsing is
//! deliberately total: a short line leaves trailing attributes absent and an
//! unparsable number leaves its attribute absent while noting the field as
//! malformed, so a bad line never aborts the run.
//!
//! ## Architecture
//!
//! - [`reader`] - Configured `csv` reader over a record source
//! - [`classifier`] - Record-type resolution from the first field
//! - [`records`] - One parser per record type plus the pass-2 detail projection
//! - [`field_parsers`] - Helpers for optional text, decimal, integer and list fields
//!
//! ## Usage
//!
//! ```rust
//! use claim_validator::app::services::record_parser::{classify, parse_footer, LineClass};
//! use claim_validator::app::models::RecordKind;
//! use csv::StringRecord;
//!
//! let record = StringRecord::from(vec!["FOOT", "4", "1"]);
//! assert_eq!(classify(&record), LineClass::Record(RecordKind::Footer));
//!
//! let footer = parse_footer(&record, 4);
//! assert_eq!(footer.number_of_lines, Some(4));
//! ```

pub mod classifier;
pub mod field_parsers;
pub mod reader;
pub mod records;

#[cfg(test)]
pub mod tests;

// Re-export main types for easy access
pub use classifier::{LineClass, classify};
pub use reader::{RecordLine, RecordReader};
pub use records::{parse_detail, parse_detail_reference, parse_footer, parse_header, parse_summary};
