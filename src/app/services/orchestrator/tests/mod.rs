//! Test utilities for the orchestrator

use crate::app::models::ValidationResult;
use crate::app::services::orchestrator::{ClaimFileValidator, ProgressSink, ProgressUpdate};
use std::sync::Mutex;

pub use crate::app::services::record_parser::tests::{
    create_temp_file, detail_fields, footer_fields, header_fields, line, minimal_file,
    summary_fields, with_field,
};


/// Sink that keeps every update for inspection
#[derive(Debug, Default)]
pub struct RecordingProgress {
    pub updates: Mutex<Vec<ProgressUpdate>>,
}

impl ProgressSink for RecordingProgress {
    fn update(&self, update: ProgressUpdate) {
        self.updates.lock().unwrap().push(update);
    }
}

/// Validate file content with the default configuration
pub fn validate_content(content: &str) -> ValidationResult {
    let file = create_temp_file(content);
    ClaimFileValidator::default()
        .validate_path(file.path())
        .unwrap()
}

/// Join lines into file content
pub fn file_of(lines: &[String]) -> String {
    lines.join("\n")
}
