//! Store errors

/// Store result type
pub type StoreResult<T> = Result<T, StoreError>;

/// Failure reading or writing analysis records
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Database driver failure
    #[error("database error: {0}")]
    Backend(#[from] rusqlite::Error),

    /// Record could not be encoded or decoded
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Blocking task panicked or was cancelled
    #[error("store task failed: {0}")]
    Join(#[from] tokio::task::JoinError),

    /// On-disk schema is newer than this build understands
    #[error("database schema version {found} is newer than supported version {supported}")]
    SchemaTooNew {
        /// Version found in the database
        found: i32,
        /// Highest version this build can read
        supported: i32,
    },
}
