//! Progress notification
//!
//! The validator reports through a [`ProgressSink`]; rendering is left to the
//! caller. Totals for pass 1 are estimates and may be off in either direction.

use std::io::Read;
use tracing::debug;

use super::phase::Phase;
use super::source::RecordSource;
use crate::Result;

/// One progress notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressUpdate {
    pub phase: Phase,
    /// Lines (or entries, for post-pass steps) processed so far
    pub current: u64,
    /// Expected total, 0 when unknown
    pub total: u64,
}

/// Receiver of progress notifications
pub trait ProgressSink: Send + Sync {
    fn update(&self, update: ProgressUpdate);
}

/// Sink that discards every notification
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn update(&self, _update: ProgressUpdate) {}
}

/// Estimate the number of lines by sampling the start of the source
///
/// Reads at most `sample_bytes`. If that covers the whole source the count is
/// exact; otherwise the size hint is divided by the mean sampled line length.
pub fn estimate_line_count(source: &dyn RecordSource, sample_bytes: usize) -> Result<u64> {
    let mut sample = Vec::with_capacity(sample_bytes);
    source
        .open()?
        .take(sample_bytes as u64)
        .read_to_end(&mut sample)?;

    if sample.is_empty() {
        return Ok(0);
    }

    let newlines = sample.iter().filter(|&&b| b == b'\n').count() as u64;
    let exhausted = sample.len() < sample_bytes
        || source.size_hint() == Some(sample.len() as u64);

    if exhausted {
        let trailing = u64::from(sample.last() != Some(&b'\n'));
        return Ok(newlines + trailing);
    }

    let estimate = match (source.size_hint(), newlines) {
        (Some(size), lines) if lines > 0 => size * lines / sample.len() as u64,
        _ => 0,
    };

    debug!(
        "Estimated {} lines from a {} byte sample of {}",
        estimate,
        sample.len(),
        source.name()
    );
    Ok(estimate)
}
