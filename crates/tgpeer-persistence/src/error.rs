//! Error types for the peer store

use thiserror::Error;

/// Peer store errors
#[derive(Debug, Error)]
pub enum StoreError {
    /// SQLite or connection pool failure
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Stored record could not be encoded or decoded
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Stored row does not describe the peer it is keyed by
    #[error("Corrupt record for peer '{peer_id}': {details}")]
    Corrupt {
        /// Row key
        peer_id: String,
        /// What is wrong with the row
        details: String,
    },
}

/// Convenient Result type alias
pub type Result<T> = std::result::Result<T, StoreError>;
