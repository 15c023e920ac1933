//! Backing stores for the sales record set.

use crate::error::{AnalyticsError, Result};
use csv::{ReaderBuilder, StringRecord, Trim};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

/// Header plus untyped rows, exactly as read from the store.
#[derive(Debug, Clone, Default)]
pub struct RawTable {
    /// Column names, trimmed
    pub headers: Vec<String>,
    /// Data rows; may be shorter than the header
    pub rows: Vec<StringRecord>,
}

/// Read-only access to a tabular sales record set.
///
/// Implementations are re-read on every call and must not cache.
pub trait SalesSource: Send + Sync {
    /// Human-readable location used in errors and logs.
    fn location(&self) -> String;

    /// Read the full table.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyticsError::DataUnavailable`] when the store cannot be
    /// found or read.
    fn load(&self) -> Result<RawTable>;
}

/// Comma-separated file on local disk.
#[derive(Debug, Clone)]
pub struct CsvFileSource {
    path: PathBuf,
}

impl CsvFileSource {
    /// Create a source for the given path. The file is not touched until
    /// [`SalesSource::load`].
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl SalesSource for CsvFileSource {
    fn location(&self) -> String {
        self.path.display().to_string()
    }

    fn load(&self) -> Result<RawTable> {
        let location = self.location();
        let file = File::open(&self.path)
            .map_err(|e| AnalyticsError::unavailable(&location, e))?;
        let table = read_table(file, &location)?;
        tracing::debug!(
            path = %location,
            rows = table.rows.len(),
            "Loaded sales file"
        );
        Ok(table)
    }
}

/// In-memory CSV text, for fixtures and embedded snapshots.
#[derive(Debug, Clone)]
pub struct CsvTextSource {
    name: String,
    text: String,
}

impl CsvTextSource {
    /// Wrap CSV text (header row first).
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            name: "<memory>".to_string(),
            text: text.into(),
        }
    }

    /// Override the name reported by [`SalesSource::location`].
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}

impl SalesSource for CsvTextSource {
    fn location(&self) -> String {
        self.name.clone()
    }

    fn load(&self) -> Result<RawTable> {
        read_table(self.text.as_bytes(), &self.name)
    }
}

/// Parse CSV from any reader. Ragged rows are kept; the pipeline decides
/// what to do with them.
pub(crate) fn read_table<R: Read>(reader: R, location: &str) -> Result<RawTable> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::Headers)
        .from_reader(reader);

    let headers = reader
        .headers()
        .map_err(|e| AnalyticsError::unavailable(location, e))?
        .iter()
        .map(str::to_string)
        .collect();

    let rows = reader
        .records()
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| AnalyticsError::unavailable(location, e))?;

    Ok(RawTable { headers, rows })
}
