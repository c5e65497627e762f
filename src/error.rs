use std::path::PathBuf;

use thiserror::Error;

/// Failures of a single run, one variant family per pipeline stage.
#[derive(Debug, Error)]
pub enum StatsError {
    #[error("fetch of {url} failed: {source}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("cache file {}: {source}", .path.display())]
    CacheIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{} is not a valid games CSV: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("{} has no `{column}` column", .path.display())]
    MissingColumn { path: PathBuf, column: &'static str },

    #[error("dataset has no games; win percentages are undefined")]
    EmptyDataset,

    #[error("rendering {} failed: {message}", .path.display())]
    Render { path: PathBuf, message: String },
}

impl StatsError {
    pub fn stage(&self) -> &'static str {
        match self {
            StatsError::Fetch { .. } => "fetch",
            StatsError::CacheIo { .. } => "load",
            StatsError::Parse { .. } => "parse",
            StatsError::MissingColumn { .. } | StatsError::EmptyDataset => "aggregate",
            StatsError::Render { .. } => "render",
        }
    }
}

pub type Result<T> = std::result::Result<T, StatsError>;
