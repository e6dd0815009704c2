//! Error types for petpal-core

use thiserror::Error;

/// Core error type
#[derive(Debug, Error)]
pub enum Error {
    /// Feeding was refused because the pet is saturated
    #[error("pet is overfed; feeding is blocked until it recovers")]
    Overfed,

    /// The mood session task is no longer running
    #[error("mood session has stopped")]
    SessionClosed,

    /// A walk was cancelled before reaching its destination
    #[error("walk cancelled at {progress}%")]
    WalkCancelled {
        /// Progress reached before cancellation
        progress: u8,
    },

    /// No pet with this id in the catalog
    #[error("unknown pet: {0}")]
    UnknownPet(String),

    /// No walk location with this name
    #[error("unknown walk location: {0}")]
    UnknownLocation(String),

    /// Invalid configuration
    #[error("invalid configuration: {field}: {message}")]
    InvalidConfig {
        /// Config field name
        field: &'static str,
        /// Detailed message
        message: String,
    },

    /// Activity ledger error
    #[error("ledger error: {0}")]
    Ledger(#[from] petpal_ledger::Error),

    /// Storage error
    #[error("storage error: {0}")]
    Store(#[from] petpal_store::Error),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
