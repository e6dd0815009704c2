//! Component initialization

use super::config::AppConfig;
use anyhow::{Context, Result};
use petpal_core::{EventBus, PetSelection};
use petpal_ledger::ActivityLedger;
use petpal_store::{KeyValueStore, StoreBackend};
use std::sync::Arc;
use tracing::info;

/// Everything a command needs
pub struct App {
    pub config: AppConfig,
    pub ledger: ActivityLedger,
    pub selection: PetSelection,
    pub events: EventBus,
}

/// Open the configured store and build the components on top of it
pub async fn init(config: AppConfig) -> Result<App> {
    let data_dir = config.data_dir();
    let store = StoreBackend::from_config(&config.storage, &data_dir)
        .await
        .context("Failed to initialize storage")?;
    info!(
        backend = store.backend(),
        data_dir = %data_dir.display(),
        "Storage initialized"
    );

    let store: Arc<dyn KeyValueStore> = Arc::new(store);
    let ledger = ActivityLedger::from_config(store.clone(), &config.ledger);
    let selection = PetSelection::new(store);

    Ok(App {
        config,
        ledger,
        selection,
        events: EventBus::default(),
    })
}
