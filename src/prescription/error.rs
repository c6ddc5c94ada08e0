use thiserror::Error;

/// Failure while loading catalog or patient data.
///
/// Only the data-loading boundary can fail; formatting never does.
#[derive(Error, Debug)]
pub enum DataError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("record {index}: {source}")]
    InvalidRecord {
        index: usize,
        source: serde_json::Error,
    },

    #[error("duplicate catalog entry: {0}")]
    DuplicateKey(String),
}
