//! Config-driven backend selection

use crate::error::{Error, Result};
use crate::memory_store::MemoryStore;
use crate::sqlite_store::SqliteStore;
use crate::traits::KeyValueStore;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

/// Get the default data directory for PetPal
pub fn default_data_dir() -> PathBuf {
    dirs::home_dir()
        .map(|p| p.join(".petpal"))
        .unwrap_or_else(|| PathBuf::from(".petpal"))
}

/// Storage backend configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Backend type: "sqlite" (default) or "memory"
    #[serde(default = "default_backend")]
    pub backend: String,

    /// SQLite database path, relative to the data directory unless absolute
    #[serde(default = "default_sqlite_path")]
    pub sqlite_path: String,
}

fn default_backend() -> String {
    "sqlite".to_string()
}

fn default_sqlite_path() -> String {
    "petpal.db".to_string()
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: default_backend(),
            sqlite_path: default_sqlite_path(),
        }
    }
}

/// Unified backend wrapping the concrete stores
#[derive(Debug, Clone)]
pub enum StoreBackend {
    /// SQLite storage (default)
    Sqlite(SqliteStore),
    /// In-memory storage
    Memory(MemoryStore),
}

impl StoreBackend {
    /// Create a backend from configuration, resolving relative paths against `data_dir`
    pub async fn from_config(config: &StoreConfig, data_dir: &Path) -> Result<Self> {
        match config.backend.as_str() {
            "sqlite" => {
                let path = data_dir.join(&config.sqlite_path);
                let store = SqliteStore::new(&path).await?;
                Ok(Self::Sqlite(store))
            }
            "memory" => {
                info!("Using in-memory storage; activity will not survive restarts");
                Ok(Self::Memory(MemoryStore::new()))
            }
            other => Err(Error::Configuration(format!(
                "Unknown storage backend: '{}'. Use 'sqlite' or 'memory'.",
                other
            ))),
        }
    }
}

#[async_trait]
impl KeyValueStore for StoreBackend {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        match self {
            Self::Sqlite(store) => store.get(key).await,
            Self::Memory(store) => store.get(key).await,
        }
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        match self {
            Self::Sqlite(store) => store.set(key, value).await,
            Self::Memory(store) => store.set(key, value).await,
        }
    }

    async fn delete(&self, key: &str) -> Result<bool> {
        match self {
            Self::Sqlite(store) => store.delete(key).await,
            Self::Memory(store) => store.delete(key).await,
        }
    }

    fn backend(&self) -> &'static str {
        match self {
            Self::Sqlite(store) => store.backend(),
            Self::Memory(store) => store.backend(),
        }
    }
}
