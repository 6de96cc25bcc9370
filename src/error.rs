// src/error.rs

use thiserror::Error;

/// Anything that can go wrong between "fetch" and "rows in hand".
///
/// Transport problems are carried as text so callers (and test doubles)
/// never need to name the HTTP crate's own error types.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("network error: {0}")]
    Network(String),

    #[error("server returned status {0}")]
    Status(u16),

    #[error("malformed response body: {0}")]
    Json(#[from] serde_json::Error),
}
