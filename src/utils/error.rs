//! Error types for the entire pipeline.
//!
//! We use `thiserror` for typed, per-stage errors. The presentation
//! adapter matches on these to report which table or column failed,
//! and keeps rendering the datasets that did load.

use thiserror::Error;

/// Errors raised while shape-checking raw input tables
#[derive(Error, Debug)]
pub enum SchemaError {
    #[error("{table} table is missing required column(s): {}", .columns.join(", "))]
    MissingColumns {
        table: &'static str,
        columns: Vec<String>,
    },

    #[error("{table} table row {row}: column '{column}' has unreadable count '{value}'")]
    InvalidCount {
        table: &'static str,
        column: String,
        row: usize,
        value: String,
    },

    #[error("row {row} has {actual} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        actual: usize,
    },
}

/// Errors raised by trend and summary derivation
#[derive(Error, Debug)]
pub enum TrendError {
    #[error("{operation} needs at least {required} monthly rows, got {actual}")]
    InsufficientData {
        operation: &'static str,
        required: usize,
        actual: usize,
    },
}

/// Errors that can occur while persisting the anonymized snapshot
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to write file: {0}")]
    WriteFailed(#[from] std::io::Error),

    #[error("Failed to serialize JSON: {0}")]
    SerializationFailed(#[from] serde_json::Error),

    #[error("Invalid output path: {0}")]
    InvalidPath(String),

    #[error("Malformed snapshot: {0}")]
    MalformedSnapshot(String),
}

/// Umbrella error for entry points that compose several stages
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error(transparent)]
    Trend(#[from] TrendError),

    #[error(transparent)]
    Output(#[from] OutputError),
}
