//! Harness error type.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum HarnessError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("fixture {path}: {message}")]
    Fixture { path: PathBuf, message: String },

    #[error("invalid argument spec '{0}', expected int:N, uint:N, float:X, float_bits:N, str:S, null or ptr:N")]
    ArgSpec(String),

    #[error("no fixture files found in {0}")]
    NoFixtures(PathBuf),
}
