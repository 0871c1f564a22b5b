//! Validation findings
//!
//! A finding is one problem (or note) attached to a line of the input. Findings
//! are data, not errors: validation never aborts because of them.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Severity levels for findings
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Severity {
    /// Informational, never affects the outcome
    Info,
    /// Advisory, does not fail the file
    Warning,
    /// Fails the file
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Severity::Info => "INFO",
            Severity::Warning => "WARNING",
            Severity::Error => "ERROR",
        };
        f.write_str(label)
    }
}

/// Category of a finding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FindingKind {
    /// Missing header/footer, ordering violation, footer count mismatch
    Structural,
    /// Missing mandatory field, wrong tag, malformed identifier/date/number
    Schema,
    /// Out-of-range percentage, arithmetic or split mismatch
    RangeOrSum,
    /// Detail referencing a summary that does not exist
    Referential,
    /// Repeated claim or summary identifier
    DuplicateKey,
    /// Style conventions and soft list mismatches
    Advisory,
    /// Record tag outside the supported set
    UnsupportedRecord,
    /// Line that could not be decomposed into fields
    Parse,
    /// Source could not be validated at all
    Fatal,
}

impl fmt::Display for FindingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// A single validation finding
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Finding {
    /// 1-based line number, 0 for file-level findings
    pub line: usize,
    pub record_type: String,
    /// Field name, possibly composite (e.g. "Start/End")
    pub field: String,
    pub message: String,
    pub severity: Severity,
    pub kind: FindingKind,
}

impl Finding {
    pub fn new(
        severity: Severity,
        kind: FindingKind,
        line: usize,
        record_type: impl Into<String>,
        field: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            line,
            record_type: record_type.into(),
            field: field.into(),
            message: message.into(),
            severity,
            kind,
        }
    }

    /// Create an Error-severity finding
    pub fn error(
        kind: FindingKind,
        line: usize,
        record_type: impl Into<String>,
        field: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::new(Severity::Error, kind, line, record_type, field, message)
    }

    /// Create a Warning-severity finding
    pub fn warning(
        kind: FindingKind,
        line: usize,
        record_type: impl Into<String>,
        field: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::new(Severity::Warning, kind, line, record_type, field, message)
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "line {} [{}] {} {}: {}",
            self.line, self.record_type, self.severity, self.field, self.message
        )
    }
}
