use thiserror::Error;

/// Errors raised while loading or saving datasets.
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("invalid month label {0:?} (expected e.g. \"Jan 1969\")")]
    InvalidMonth(String),
    #[error("unknown category {0:?}")]
    UnknownCategory(String),
    #[error("csv: {0}")]
    Csv(#[from] csv::Error),
    #[error("json: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
