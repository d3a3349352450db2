//! Error types for the flatcheck library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for flatcheck operations.
///
/// Structural and configuration problems surface here; validation
/// findings never do — they are ordinary data carried in
/// [`TestCaseStepResult`](crate::rules::TestCaseStepResult).
#[derive(Debug, Error)]
pub enum FlatCheckError {
    /// Error reading or accessing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error from the CSV library.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A catalog definition failed load-time validation.
    #[error("Invalid catalog entry '{structure}': {message}")]
    Catalog { structure: String, message: String },

    /// More than one structure pattern matches a filename. Signals
    /// overlapping patterns in the catalog, not a data problem.
    #[error("Ambiguous structure for '{filename}': structures {} all match", matches.join(", "))]
    AmbiguousStructure {
        filename: String,
        matches: Vec<String>,
    },

    /// No structure pattern matches a filename.
    #[error("No structure found for '{filename}'")]
    NoStructure { filename: String },

    /// A row's discriminator has no corresponding row structure.
    #[error("Unknown row type '{row_type}' at row {row} of '{file}'")]
    UnknownRowType {
        /// 1-based row index.
        row: usize,
        row_type: String,
        file: String,
    },

    /// A requested rule name resolves against no provider.
    #[error("Rule '{rule}' not found in any provider")]
    RuleNotFound { rule: String },
}

/// Result type alias for flatcheck operations.
pub type Result<T> = std::result::Result<T, FlatCheckError>;
