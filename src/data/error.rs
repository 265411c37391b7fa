use std::path::PathBuf;

use thiserror::Error;

/// Fatal errors raised while loading a catalog file.
///
/// Row-level problems that the pipeline absorbs (an unparseable `owners`
/// cell) never show up here.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("reading {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unsupported file extension: .{0}")]
    UnsupportedExtension(String),

    #[error("missing required column '{0}'")]
    MissingColumn(&'static str),

    #[error("row {row}: invalid value for '{column}': {message}")]
    InvalidField {
        row: usize,
        column: &'static str,
        message: String,
    },

    #[error("row {row}: unparseable release_date '{value}'")]
    InvalidDate { row: usize, value: String },

    #[error("CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Parquet: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    #[error("Arrow: {0}")]
    Arrow(#[from] arrow::error::ArrowError),
}

impl LoadError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        LoadError::Io {
            path: path.into(),
            source,
        }
    }
}
