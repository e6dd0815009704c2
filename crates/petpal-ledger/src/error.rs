//! Error types for the activity ledger.

/// Errors surfaced by ledger operations.
///
/// Unparsable stored data is not an error: it is replaced by an empty log.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Storage backend failure
    #[error("storage error: {0}")]
    Store(#[from] petpal_store::Error),

    /// Serialization failure while writing the log
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Convenience Result type.
pub type Result<T> = std::result::Result<T, Error>;
