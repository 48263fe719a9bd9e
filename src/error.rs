//! Error types.

use thiserror::Error;

/// Failure writing the leaderboard to its backing store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("leaderboard storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("leaderboard encoding failed: {0}")]
    Json(#[from] serde_json::Error),
}
