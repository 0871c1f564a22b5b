//! Validation orchestrator
//!
//! Drives one validation run through its phases:
//!
//! ```text
//! Idle -> Pass1 -> Pass2 -> PostPass -> StructureCheck -> Complete
//! ```
//!
//! Pass 1 classifies, parses and field-validates every line while building the
//! [`ValidationIndex`](crate::app::services::cross_reference::ValidationIndex).
//! Pass 2 re-streams the source to resolve detail references. The post-pass
//! steps work from the index alone.
//!
//! - [`source`] - Re-openable record sources (files, spooled stdin)
//! - [`progress`] - Progress sink contract and line-count estimation
//! - [`phase`] - The phase state machine
//! - [`validator`] - [`ClaimFileValidator`], the entry point

pub mod phase;
pub mod progress;
pub mod source;
pub mod validator;

#[cfg(test)]
pub mod tests;

pub use phase::Phase;
pub use progress::{NoProgress, ProgressSink, ProgressUpdate, estimate_line_count};
pub use source::{FileSource, RecordSource, SpooledSource};
pub use validator::ClaimFileValidator;
