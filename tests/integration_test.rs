//! Integration tests for PetPal
//!
//! These tests verify the integration between the workspace crates:
//! - petpal-store: SQLite and in-memory key-value storage
//! - petpal-ledger: Day-bucketed activity accounting
//! - petpal-core: Mood sessions and pet selection reporting into the ledger

use std::sync::Arc;

use petpal_core::{Error, Mood, MoodConfig, MoodSession, PetSelection};
use petpal_ledger::{ActivityLedger, LedgerConfig, Reaction};
use petpal_store::{KeyValueStore, StoreBackend, StoreConfig};
use tempfile::TempDir;

async fn sqlite_backend(dir: &TempDir) -> Arc<dyn KeyValueStore> {
    let store = StoreBackend::from_config(&StoreConfig::default(), dir.path())
        .await
        .unwrap();
    Arc::new(store)
}

// ============================================================================
// Storage + Ledger
// ============================================================================

#[tokio::test]
async fn test_ledger_persists_across_reopen() {
    let dir = TempDir::new().unwrap();

    {
        let ledger = ActivityLedger::new(sqlite_backend(&dir).await);
        ledger.record_feeding().await.unwrap();
        ledger.record_feeding().await.unwrap();
        ledger.record_feeding().await.unwrap();
    }

    let ledger = ActivityLedger::new(sqlite_backend(&dir).await);
    let stats = ledger.weekly_stats().await.unwrap();
    assert_eq!(stats.total_feedings, 3);
    assert_eq!(stats.all_time_reactions.get(Reaction::Hungry), 3);
    assert_eq!(ledger.today_mood().await.unwrap(), 65);
}

#[tokio::test]
async fn test_ledger_and_selection_share_a_store() {
    let dir = TempDir::new().unwrap();
    let store = sqlite_backend(&dir).await;

    let ledger = ActivityLedger::from_config(store.clone(), &LedgerConfig::default());
    let selection = PetSelection::new(store.clone());

    selection.select("koala").await.unwrap();
    ledger.record_caring().await.unwrap();

    assert!(store.get("pet_activity").await.unwrap().is_some());
    assert!(store.get("selected_pet").await.unwrap().is_some());
    assert_eq!(selection.load().await.unwrap().name, "Koala");
}

#[tokio::test]
async fn test_unknown_backend_is_rejected() {
    let dir = TempDir::new().unwrap();
    let config = StoreConfig {
        backend: "redis".to_string(),
        ..StoreConfig::default()
    };
    assert!(StoreBackend::from_config(&config, dir.path()).await.is_err());
}

// ============================================================================
// Mood Session + Ledger
// ============================================================================

#[tokio::test]
async fn test_session_reports_into_sqlite_ledger() {
    let dir = TempDir::new().unwrap();
    let ledger = ActivityLedger::new(sqlite_backend(&dir).await);

    let session = MoodSession::spawn(MoodConfig::default(), Arc::new(ledger.clone())).unwrap();
    session.feed().await.unwrap();
    session.feed().await.unwrap();
    let snap = session.feed().await.unwrap();
    assert_eq!(snap.mood, Mood::Overfed);
    assert!(matches!(session.feed().await, Err(Error::Overfed)));

    session.play().await.unwrap();
    session.shutdown().await;

    let today = ledger.record_for(ledger.today()).await.unwrap();
    assert_eq!(today.feeding, 3);
    assert_eq!(today.playing, 1);
    assert_eq!(today.reactions.get(Reaction::Overfed), 1);
    assert_eq!(today.reactions.get(Reaction::Excited), 1);
    assert!(today.mood <= 100);
}
