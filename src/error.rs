//! Structural error taxonomy.
//!
//! Only failures that must abort a run live here: a missing or truncated input
//! source, a header without a required field, or an unusable configuration.
//! Row-level data problems never surface as errors; they are skipped at the
//! point of use and counted in debug logs.

use std::path::PathBuf;

/// Fatal errors raised while loading inputs or configuration
#[derive(Debug, thiserror::Error)]
pub enum Error
{
    /// A required input file does not exist
    #[error("input not found: {}", path.display())]
    MissingInput
    {
        path: PathBuf
    },

    /// A table is too short for the configured header/data offsets
    #[error("{} has {rows} rows, expected at least {needed} (data_start_row)", path.display())]
    TooShort
    {
        path: PathBuf,
        rows: usize,
        needed: usize,
    },

    /// A headed table lacks a column the stage depends on
    #[error("{} is missing required column `{column}`", path.display())]
    MissingColumn
    {
        path: PathBuf,
        column: String,
    },

    /// Configuration values that contradict each other
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Underlying CSV reader/writer failure
    #[error(transparent)]
    Csv(#[from] csv::Error),

    /// Underlying filesystem failure
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
