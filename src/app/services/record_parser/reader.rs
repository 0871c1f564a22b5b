//! Line-oriented record reader
//!
//! Wraps a `csv` reader configured for the claim file format: tab delimited,
//! no quoting, no header row and a variable number of fields per line. Lines
//! are read as bytes so blank and comment lines are recognized before any
//! UTF-8 decoding. The caller owns the `StringRecord` buffer and its
//! allocation is recycled between lines.

use crate::constants::{COMMENT_MARKER, FIELD_DELIMITER};
use crate::{Error, Result};
use csv::{ByteRecord, ErrorKind, StringRecord};
use std::io::Read;

/// What one call to [`RecordReader::read_next`] produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordLine {
    /// A decodable line, now held in the caller's buffer
    Record { line: usize },
    /// A blank or `#` comment line; the caller's buffer is untouched
    Skipped { line: usize },
    /// A line that could not be split into fields or decoded
    Undecodable { line: usize, message: String },
}

/// Streaming reader over one pass of a claim file
pub struct RecordReader<R: Read> {
    inner: csv::Reader<R>,
    bytes: ByteRecord,
    source_name: String,
    last_line: usize,
}

impl<R: Read> RecordReader<R> {
    /// Create a reader for the claim file format
    pub fn new(reader: R, source_name: impl Into<String>) -> Self {
        let inner = csv::ReaderBuilder::new()
            .delimiter(FIELD_DELIMITER)
            .has_headers(false)
            .flexible(true)
            .quoting(false)
            .from_reader(reader);

        Self {
            inner,
            bytes: ByteRecord::new(),
            source_name: source_name.into(),
            last_line: 0,
        }
    }

    /// Read the next line into `record`
    ///
    /// Returns `Ok(None)` at end of input. Decoding problems are confined to
    /// their line; only I/O failures are returned as errors.
    pub fn read_next(&mut self, record: &mut StringRecord) -> Result<Option<RecordLine>> {
        match self.inner.read_byte_record(&mut self.bytes) {
            Ok(true) => {}
            Ok(false) => return Ok(None),
            Err(e) => {
                let line = e
                    .position()
                    .map(|pos| pos.line() as usize)
                    .unwrap_or(self.last_line + 1);

                return match e.kind() {
                    ErrorKind::Io(_) => Err(Error::record_reading(
                        self.source_name.clone(),
                        format!("Failed to read line {}", line),
                        Some(e),
                    )),
                    _ => {
                        self.last_line = line;
                        Ok(Some(RecordLine::Undecodable {
                            line,
                            message: e.to_string(),
                        }))
                    }
                };
            }
        }

        let line = self
            .bytes
            .position()
            .map(|pos| pos.line() as usize)
            .unwrap_or(self.last_line + 1);
        self.last_line = line;

        if is_skippable(&self.bytes) {
            return Ok(Some(RecordLine::Skipped { line }));
        }

        // Swap buffers so the caller's old allocation is read into next time
        let bytes = std::mem::replace(&mut self.bytes, std::mem::take(record).into_byte_record());
        match StringRecord::from_byte_record(bytes) {
            Ok(decoded) => {
                *record = decoded;
                Ok(Some(RecordLine::Record { line }))
            }
            Err(e) => {
                let message = format!(
                    "invalid UTF-8 in field {} after byte {}",
                    e.utf8_error().field() + 1,
                    e.utf8_error().valid_up_to()
                );
                self.bytes = e.into_byte_record();
                Ok(Some(RecordLine::Undecodable { line, message }))
            }
        }
    }

    /// Name of the source, used in error messages
    pub fn source_name(&self) -> &str {
        &self.source_name
    }
}

/// Blank line, or first field starting with the comment marker
fn is_skippable(record: &ByteRecord) -> bool {
    let first = record.get(0).unwrap_or_default().trim_ascii_start();
    first.first() == Some(&(COMMENT_MARKER as u8))
        || record.iter().all(|field| field.trim_ascii().is_empty())
}
