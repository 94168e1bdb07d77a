//! Error types for rust_lfc_corr

use thiserror::Error;

/// Main error type for log2FC correlation runs
#[derive(Error, Debug)]
pub enum CorrError {
    #[error("Missing column '{column}' (available: {available})")]
    MissingColumn { column: String, available: String },

    #[error("Unsupported table format: {path}")]
    UnsupportedFormat { path: String },

    #[error("Duplicate gene identifier '{gene}' in {table}")]
    DuplicateKey { gene: String, table: String },

    #[error("Insufficient data: {n} records, at least {required} required")]
    InsufficientData { n: usize, required: usize },

    #[error("Degenerate input: {reason}")]
    DegenerateInput { reason: String },

    #[error("Invalid input: {reason}")]
    InvalidInput { reason: String },

    #[error("Empty data: {reason}")]
    EmptyData { reason: String },

    #[error("Plotting failed: {reason}")]
    Plot { reason: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV parsing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Spreadsheet error: {0}")]
    SpreadsheetError(#[from] calamine::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Result type alias for correlation operations
pub type Result<T> = std::result::Result<T, CorrError>;
