//! Claim Validator Library
//!
//! A Rust library for validating large tab-delimited batch files that report
//! musical-work usage claims.
//!
//! This library provides tools for:
//! - Classifying and parsing header, summary, detail and footer records
//! - Field-level format and business rule checks per record type
//! - A compact cross-reference index built in pass 1 and consumed in pass 2
//! - Reconciling declared summary totals against accumulated detail amounts
//! - File-level structure checks against the footer's declared counts
//!
//! Memory use is bounded by the number of distinct summary identifiers, not
//! by the size of the file: records are dropped as soon as their projection
//! has been captured.

pub mod config;
pub mod constants;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services {
        pub mod cross_reference;
        pub mod field_validator;
        pub mod orchestrator;
        pub mod record_parser;
    }
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use app::models::{Finding, FindingKind, Severity, Statistics, ValidationResult};
pub use app::services::orchestrator::{ClaimFileValidator, FileSource, RecordSource};
pub use config::ValidatorConfig;

/// Result type alias for the claim validator
pub type Result<T> = std::result::Result<T, Error>;

/// Runtime error types for claim validation
///
/// These cover failures of the run itself. Problems found *in* the file are
/// reported as [`Finding`]s and never surface here.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Record reader failed in a way that cannot be attributed to one line
    #[error("Record reading error in '{source_name}': {message}")]
    RecordReading {
        source_name: String,
        message: String,
        #[source]
        source: Option<csv::Error>,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Serialization of a report or configuration failed
    #[error("Serialization error: {message}")]
    Serialization {
        message: String,
        #[source]
        source: serde_json::Error,
    },

    /// Validation phases were driven out of order
    #[error("Invalid phase transition: {from} -> {to}")]
    PhaseTransition { from: String, to: String },

    /// Processing interrupted
    #[error("Processing interrupted: {reason}")]
    ProcessingInterrupted { reason: String },
}

impl Error {
    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a record reading error
    pub fn record_reading(
        source_name: impl Into<String>,
        message: impl Into<String>,
        source: Option<csv::Error>,
    ) -> Self {
        Self::RecordReading {
            source_name: source_name.into(),
            message: message.into(),
            source,
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a serialization error
    pub fn serialization(message: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Serialization {
            message: message.into(),
            source,
        }
    }

    /// Create a phase transition error
    pub fn phase_transition(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self::PhaseTransition {
            from: from.into(),
            to: to.into(),
        }
    }

    /// Create a processing interrupted error
    pub fn processing_interrupted(reason: impl Into<String>) -> Self {
        Self::ProcessingInterrupted {
            reason: reason.into(),
        }
    }
}

// Automatic conversions from common error types
impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: "I/O operation failed".to_string(),
            source: error,
        }
    }
}

impl From<csv::Error> for Error {
    fn from(error: csv::Error) -> Self {
        Self::RecordReading {
            source_name: "unknown".to_string(),
            message: "Record reading failed".to_string(),
            source: Some(error),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Self::Serialization {
            message: "JSON serialization failed".to_string(),
            source: error,
        }
    }
}
