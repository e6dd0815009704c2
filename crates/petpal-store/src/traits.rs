//! Trait for key-value storage backends

use crate::error::Result;
use async_trait::async_trait;

/// Key-value storage backend.
///
/// Values are stored as text. Implementations never interpret them; parsing
/// and the fallback for unparsable values belong to the caller.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Get the value stored under `key`
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value
    async fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Delete `key`. Returns whether a value was removed.
    async fn delete(&self, key: &str) -> Result<bool>;

    /// Backend name (for logging)
    fn backend(&self) -> &'static str;
}
