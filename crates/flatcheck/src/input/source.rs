//! Parsed-file representation and source metadata.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::grouping::RowGroups;
use crate::schema::FileStructure;

/// Metadata about a source file that has been parsed from disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceMetadata {
    /// File name without path.
    pub file: String,
    /// Full path to the file.
    pub path: PathBuf,
    /// SHA-256 hash of the file contents.
    pub hash: String,
    /// File size in bytes.
    pub size_bytes: u64,
    /// Number of parsed data rows (after any header skip).
    pub row_count: usize,
    /// When the file was parsed.
    pub parsed_at: DateTime<Utc>,
}

impl SourceMetadata {
    /// Create metadata for a parsed file.
    pub fn new(path: PathBuf, hash: String, size_bytes: u64, row_count: usize) -> Self {
        let file = path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        Self {
            file,
            path,
            hash,
            size_bytes,
            row_count,
            parsed_at: Utc::now(),
        }
    }
}

/// One source parsed against one [`FileStructure`].
///
/// Rows are kept verbatim in source order; nothing is dropped,
/// reordered or deduplicated. The structure is borrowed from the
/// catalog, which outlives every parse.
#[derive(Debug, Clone)]
pub struct ParsedFile<'a> {
    /// The structure the source was parsed against.
    pub structure: &'a FileStructure,
    /// Display name used in findings and error messages.
    pub display_name: String,
    /// Row data in source order; each row is its ordered field list.
    pub rows: Vec<Vec<String>>,
}

impl<'a> ParsedFile<'a> {
    /// Create a parsed file from already-split rows.
    pub fn new(structure: &'a FileStructure, display_name: impl Into<String>, rows: Vec<Vec<String>>) -> Self {
        Self {
            structure,
            display_name: display_name.into(),
            rows,
        }
    }

    /// Number of data rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Get a field by 0-based row index and 1-based column position.
    ///
    /// Positions beyond a row's actual length read as empty, so short
    /// rows never panic and rules can flag the missing fields.
    pub fn field(&self, row: usize, position: usize) -> &str {
        self.rows
            .get(row)
            .and_then(|r| r.get(position.checked_sub(1)?))
            .map(String::as_str)
            .unwrap_or("")
    }

    /// Partition rows into groups keyed by the schema-defined key.
    ///
    /// See [`crate::grouping::group_rows`] for the contract.
    pub fn group_by_key(&self) -> Result<RowGroups<'_>> {
        crate::grouping::group_rows(self)
    }

    /// List the grouping keys present in the file.
    pub fn keys(&self) -> Result<Vec<String>> {
        Ok(self
            .group_by_key()?
            .keys()
            .map(ToString::to_string)
            .collect())
    }
}
