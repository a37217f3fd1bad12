//! Error types for the catalog pipeline.

use std::path::PathBuf;

use polars::prelude::PolarsError;

/// Result type for pipeline operations
pub type PipelineResult<T> = Result<T, PipelineError>;

/// Error type for pipeline operations
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("Input not found: {}", path.display())]
    InputNotFound { path: PathBuf },

    #[error("Malformed CSV in {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: PolarsError,
    },

    #[error("Table '{table}' is missing required column '{column}'")]
    MissingColumn { table: String, column: String },

    #[error("Table '{table}' has no rows left at step '{step}'")]
    EmptyResultSet { table: String, step: String },

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Dataframe error: {0}")]
    Polars(#[from] PolarsError),
}

impl PipelineError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        PipelineError::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn empty(table: &str, step: &str) -> Self {
        PipelineError::EmptyResultSet {
            table: table.to_string(),
            step: step.to_string(),
        }
    }
}
