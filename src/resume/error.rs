//! Resume point error types.

use thiserror::Error;

/// Errors that can occur while persisting a resume point
#[derive(Debug, Error)]
pub enum StoreError {
    /// Encoding the index to its wire value failed
    #[error("serializing resume index failed: {0}")]
    Serialization(String),

    /// The storage backend rejected the write
    #[error("storage backend rejected the write: {0}")]
    Backend(String),
}
