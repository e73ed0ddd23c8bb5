//! FILENAME: core/survey-data/src/error.rs

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DataError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid file format: {0}")]
    InvalidFormat(String),

    #[error("Invalid response at index {index}: {reason}")]
    InvalidResponse { index: usize, reason: String },
}
