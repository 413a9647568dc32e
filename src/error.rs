use std::path::PathBuf;

use thiserror::Error;

// ---------------------------------------------------------------------------
// Error taxonomy
// ---------------------------------------------------------------------------

/// Failures while reading the input table. Every variant is fatal: the
/// pipeline has no fallback dataset.
#[derive(Debug, Error)]
pub enum DataLoadError {
    #[error("cannot open {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("missing required column '{0}'")]
    MissingColumn(&'static str),

    #[error("row {row}, column '{column}': '{value}' is not a number")]
    BadNumber {
        row: usize,
        column: &'static str,
        value: String,
    },
}

/// Record count incompatible with a fixed reshape target. Raised before any
/// artifact is written.
#[derive(Debug, Error)]
#[error("cannot reshape {len} records into {rows} rows: record count must be divisible by {rows}")]
pub struct ShapeError {
    pub len: usize,
    pub rows: usize,
}
