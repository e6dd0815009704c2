//! Application configuration types

use petpal_core::{MoodConfig, WalkConfig};
use petpal_ledger::LedgerConfig;
use petpal_store::{default_data_dir, StoreConfig};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Data directory; `~/.petpal` when unset
    #[serde(default)]
    pub data_dir: Option<String>,
    #[serde(default)]
    pub storage: StoreConfig,
    #[serde(default)]
    pub ledger: LedgerConfig,
    #[serde(default)]
    pub mood: MoodConfig,
    #[serde(default)]
    pub walk: WalkConfig,
}

impl AppConfig {
    /// Resolved data directory
    pub fn data_dir(&self) -> PathBuf {
        self.data_dir
            .as_deref()
            .filter(|d| !d.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(default_data_dir)
    }
}
