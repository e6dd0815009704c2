//! PetPal Store - key-value persistence
//!
//! The storage collaborator for the pet core. Values are opaque text blobs
//! addressed by string keys; callers own their (de)serialization.
//!
//! - `MemoryStore`: process-local map (tests, throwaway sessions)
//! - `SqliteStore`: single-table SQLite file (default)
//! - `StoreBackend`: config-driven wrapper over the two

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod backend;
pub mod error;
mod memory_store;
mod sqlite_store;
mod traits;

pub use backend::{default_data_dir, StoreBackend, StoreConfig};
pub use error::{Error, Result};
pub use memory_store::MemoryStore;
pub use sqlite_store::SqliteStore;
pub use traits::KeyValueStore;
