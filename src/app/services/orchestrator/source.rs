//! Record sources
//!
//! Validation reads its input twice, so a source hands out a fresh reader on
//! every [`RecordSource::open`]. Streams that cannot be re-read are spooled to
//! a temporary file first.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::debug;

use crate::{Error, Result};

/// Input that can be streamed from the start any number of times
pub trait RecordSource: Send + Sync {
    /// Display name for findings and logs
    fn name(&self) -> String;

    /// Whether the source can be opened at all
    fn exists(&self) -> bool;

    /// Open a new reader positioned at the first byte
    fn open(&self) -> Result<Box<dyn Read + Send>>;

    /// Size in bytes, when known
    fn size_hint(&self) -> Option<u64>;
}

/// A claim file on disk, re-opened for each pass
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RecordSource for FileSource {
    fn name(&self) -> String {
        self.path.display().to_string()
    }

    fn exists(&self) -> bool {
        self.path.is_file()
    }

    fn open(&self) -> Result<Box<dyn Read + Send>> {
        let file = File::open(&self.path)
            .map_err(|e| Error::io(format!("Failed to open {}", self.path.display()), e))?;
        Ok(Box::new(BufReader::new(file)))
    }

    fn size_hint(&self) -> Option<u64> {
        std::fs::metadata(&self.path).ok().map(|m| m.len())
    }
}

/// A one-shot stream copied to a temporary file
///
/// The spool is deleted when the source is dropped.
#[derive(Debug)]
pub struct SpooledSource {
    name: String,
    spool: NamedTempFile,
    size: u64,
}

impl SpooledSource {
    /// Copy `reader` to a temporary file
    pub fn from_reader<R: Read>(mut reader: R, name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        let mut spool = NamedTempFile::new()
            .map_err(|e| Error::io("Failed to create spool file", e))?;
        let size = std::io::copy(&mut reader, spool.as_file_mut())
            .map_err(|e| Error::io(format!("Failed to spool {}", name), e))?;

        debug!("Spooled {} bytes from {} to {}", size, name, spool.path().display());
        Ok(Self { name, spool, size })
    }

    /// Spool standard input
    pub fn from_stdin() -> Result<Self> {
        Self::from_reader(std::io::stdin().lock(), "<stdin>")
    }
}

impl RecordSource for SpooledSource {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn exists(&self) -> bool {
        true
    }

    fn open(&self) -> Result<Box<dyn Read + Send>> {
        let file = self
            .spool
            .reopen()
            .map_err(|e| Error::io(format!("Failed to reopen spool for {}", self.name), e))?;
        Ok(Box::new(BufReader::new(file)))
    }

    fn size_hint(&self) -> Option<u64> {
        Some(self.size)
    }
}
