//! Tabular sources for seeding.
//!
//! A source yields rows as field-name to text mappings. [`CsvSource`] reads
//! a CSV file whose header row names the fields; [`MemorySource`] holds rows
//! built in code.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::error::{BenchmarkError, BenchmarkResult};

/// One row of a tabular source, keyed by field name.
pub type SourceRow = HashMap<String, String>;

/// Anything that can supply seed rows.
pub trait TabularSource {
    /// Human-readable name of the source, used in logs and errors.
    fn describe(&self) -> String;

    /// Reads every row of the source.
    fn rows(&self) -> BenchmarkResult<Vec<SourceRow>>;
}

/// A CSV file with a header row.
///
/// Header names are trimmed. Rows may have fewer or more cells than the
/// header; missing cells are absent from the row and extra cells are
/// ignored.
#[derive(Debug, Clone)]
pub struct CsvSource {
    path: PathBuf,
}

impl CsvSource {
    /// Returns a source for `path`, or `None` if no such file exists.
    pub fn open(path: impl AsRef<Path>) -> Option<Self> {
        let path = path.as_ref();
        if path.is_file() {
            Some(Self {
                path: path.to_path_buf(),
            })
        } else {
            None
        }
    }

    fn parse_error(&self, error: csv::Error) -> BenchmarkError {
        BenchmarkError::SourceParseError {
            path: self.describe(),
            message: error.to_string(),
        }
    }
}

impl TabularSource for CsvSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn rows(&self) -> BenchmarkResult<Vec<SourceRow>> {
        if !self.path.is_file() {
            return Err(BenchmarkError::SourceNotFound {
                path: self.describe(),
            });
        }

        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .trim(csv::Trim::Headers)
            .from_path(&self.path)
            .map_err(|e| self.parse_error(e))?;

        let headers = reader.headers().map_err(|e| self.parse_error(e))?.clone();

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record.map_err(|e| self.parse_error(e))?;
            let row = headers
                .iter()
                .zip(record.iter())
                .map(|(name, value)| (name.to_string(), value.to_string()))
                .collect();
            rows.push(row);
        }
        Ok(rows)
    }
}

/// Rows held in memory.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    name: String,
    rows: Vec<SourceRow>,
}

impl MemorySource {
    /// Creates an empty source with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rows: Vec::new(),
        }
    }

    /// Appends a row given as `(field, value)` pairs.
    pub fn with_row<K, V>(mut self, fields: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.rows.push(
            fields
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        );
        self
    }
}

impl TabularSource for MemorySource {
    fn describe(&self) -> String {
        self.name.clone()
    }

    fn rows(&self) -> BenchmarkResult<Vec<SourceRow>> {
        Ok(self.rows.clone())
    }
}
