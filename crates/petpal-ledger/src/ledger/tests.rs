use super::*;
use crate::clock::FixedClock;
use crate::record::DEFAULT_MOOD_SCORE;
use async_trait::async_trait;
use mockall::mock;
use petpal_store::MemoryStore;

mock! {
    Store {}

    #[async_trait]
    impl KeyValueStore for Store {
        async fn get(&self, key: &str) -> petpal_store::Result<Option<String>>;
        async fn set(&self, key: &str, value: &str) -> petpal_store::Result<()>;
        async fn delete(&self, key: &str) -> petpal_store::Result<bool>;
        fn backend(&self) -> &'static str;
    }
}

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn test_ledger() -> (ActivityLedger, MemoryStore, Arc<FixedClock>) {
    let store = MemoryStore::new();
    let clock = Arc::new(FixedClock::new(day(2024, 6, 15)));
    let ledger = ActivityLedger::new(Arc::new(store.clone())).with_clock(clock.clone());
    (ledger, store, clock)
}

#[tokio::test]
async fn test_three_feedings_from_empty_storage() {
    let (ledger, _store, _clock) = test_ledger();

    for _ in 0..3 {
        ledger.record_feeding().await.unwrap();
    }

    let today = ledger.record_for(day(2024, 6, 15)).await.unwrap();
    assert_eq!(today.feeding, 3);
    assert_eq!(today.reactions.get(Reaction::Hungry), 3);
    assert_eq!(today.mood, 65);
}

#[tokio::test]
async fn test_playing_and_caring() {
    let (ledger, _store, _clock) = test_ledger();

    let after_play = ledger.record_playing().await.unwrap();
    assert_eq!(after_play.playing, 1);
    assert_eq!(after_play.reactions.get(Reaction::Excited), 1);
    assert_eq!(after_play.mood, 60);

    let after_care = ledger.record_caring().await.unwrap();
    assert_eq!(after_care.caring, 1);
    assert_eq!(after_care.reactions.get(Reaction::Content), 1);
    assert_eq!(after_care.mood, 67);
}

#[tokio::test]
async fn test_mood_changes_adjust_score() {
    let (ledger, _store, _clock) = test_ledger();

    assert_eq!(ledger.record_mood_change(Mood::Sad).await.unwrap().mood, 45);
    assert_eq!(ledger.record_mood_change(Mood::Overfed).await.unwrap().mood, 42);
    assert_eq!(ledger.record_mood_change(Mood::Happy).await.unwrap().mood, 44);

    let record = ledger.record_mood_change(Mood::Neutral).await.unwrap();
    assert_eq!(record.mood, 44);
    assert_eq!(record.reactions.get(Reaction::Content), 1);
    assert_eq!(record.reactions.get(Reaction::Sad), 1);
    assert_eq!(record.reactions.get(Reaction::Overfed), 1);
    assert_eq!(record.reactions.get(Reaction::Happy), 1);
}

#[tokio::test]
async fn test_ignore_bumps_sleepy() {
    let (ledger, _store, _clock) = test_ledger();

    let record = ledger.record_ignore().await.unwrap();
    assert_eq!(record.reactions.get(Reaction::Sleepy), 1);
    assert_eq!(record.mood, 48);
}

#[tokio::test]
async fn test_score_clamped_at_both_ends() {
    let (ledger, _store, _clock) = test_ledger();

    for _ in 0..10 {
        ledger.record_playing().await.unwrap();
    }
    assert_eq!(ledger.today_mood().await.unwrap(), 100);

    for _ in 0..30 {
        ledger.record_mood_change(Mood::Sad).await.unwrap();
    }
    assert_eq!(ledger.today_mood().await.unwrap(), 0);
}

#[tokio::test]
async fn test_unknown_mood_label_is_noop() {
    let (ledger, store, _clock) = test_ledger();

    assert!(ledger.record_mood_label("furious").await.unwrap().is_none());
    assert!(store.is_empty().await);

    let record = ledger.record_mood_label("sad").await.unwrap().unwrap();
    assert_eq!(record.mood, 45);
}

#[tokio::test]
async fn test_today_mood_materializes_default_record() {
    let (ledger, store, _clock) = test_ledger();
    assert!(store.is_empty().await);

    assert_eq!(ledger.today_mood().await.unwrap(), DEFAULT_MOOD_SCORE);

    let raw = store.get(DEFAULT_STORAGE_KEY).await.unwrap().unwrap();
    let log: BTreeMap<String, ActivityRecord> = serde_json::from_str(&raw).unwrap();
    assert!(log.contains_key("2024-06-15"));
}

#[tokio::test]
async fn test_weekly_stats_window_shape() {
    let (ledger, store, clock) = test_ledger();

    ledger.record_feeding().await.unwrap();
    clock.advance_days(3);
    ledger.record_playing().await.unwrap();

    let stats = ledger.weekly_stats().await.unwrap();
    assert_eq!(stats.weekly_data.len(), 7);
    assert_eq!(stats.weekly_data[0].date, "2024-06-12");
    assert_eq!(stats.weekly_data[6].date, "2024-06-18");
    assert_eq!(stats.weekly_data[3].feeding, 1);
    assert_eq!(stats.weekly_data[6].playing, 1);
    assert_eq!(stats.total_feedings, 1);
    assert_eq!(stats.total_playing, 1);
    // (5 * 50 + 55 + 60) / 7 = 52.14
    assert_eq!(stats.avg_mood, 52);
    assert_eq!(stats.all_time_reactions.get(Reaction::Hungry), 1);
    assert_eq!(stats.all_time_reactions.get(Reaction::Excited), 1);

    // Synthesized days are not persisted
    let raw = store.get(DEFAULT_STORAGE_KEY).await.unwrap().unwrap();
    let log: BTreeMap<String, ActivityRecord> = serde_json::from_str(&raw).unwrap();
    assert_eq!(log.len(), 2);
}

#[tokio::test]
async fn test_weekly_stats_excludes_older_days() {
    let (ledger, _store, clock) = test_ledger();

    ledger.record_caring().await.unwrap();
    clock.advance_days(7);

    let stats = ledger.weekly_stats().await.unwrap();
    assert_eq!(stats.total_caring, 0);
    assert_eq!(stats.avg_mood, DEFAULT_MOOD_SCORE);
    assert_eq!(stats.today().unwrap().date, "2024-06-22");
}

#[tokio::test]
async fn test_weekly_stats_is_idempotent() {
    let (ledger, store, _clock) = test_ledger();
    ledger.record_feeding().await.unwrap();
    let before = store.get(DEFAULT_STORAGE_KEY).await.unwrap();

    let first = ledger.weekly_stats().await.unwrap();
    let second = ledger.weekly_stats().await.unwrap();
    assert_eq!(first, second);
    assert_eq!(store.get(DEFAULT_STORAGE_KEY).await.unwrap(), before);
}

#[tokio::test]
async fn test_malformed_log_is_replaced() {
    let (ledger, store, _clock) = test_ledger();
    store.set(DEFAULT_STORAGE_KEY, "{not json").await.unwrap();

    let stats = ledger.weekly_stats().await.unwrap();
    assert_eq!(stats.total_interactions(), 0);

    let record = ledger.record_feeding().await.unwrap();
    assert_eq!(record.feeding, 1);
    assert_eq!(record.mood, 55);
}

#[tokio::test]
async fn test_bad_day_entry_keeps_other_days() {
    let (ledger, store, _clock) = test_ledger();
    store
        .set(
            DEFAULT_STORAGE_KEY,
            r#"{"2024-06-10":{"feeding":9,"mood":80},"2024-06-14":{"date":"2024-06-14","feeding":-1}}"#,
        )
        .await
        .unwrap();

    ledger.record_caring().await.unwrap();

    let kept = ledger.record_for(day(2024, 6, 10)).await.unwrap();
    assert_eq!(kept.date, "2024-06-10");
    assert_eq!(kept.feeding, 9);
    assert_eq!(kept.mood, 80);

    let raw = store.get(DEFAULT_STORAGE_KEY).await.unwrap().unwrap();
    assert!(raw.contains("2024-06-10"));
    assert!(!raw.contains("2024-06-14"));
    assert!(raw.contains("2024-06-15"));
}

#[tokio::test]
async fn test_out_of_range_stored_mood_is_clamped() {
    let (ledger, store, _clock) = test_ledger();
    store
        .set(
            DEFAULT_STORAGE_KEY,
            r#"{"2024-06-15":{"date":"2024-06-15","mood":200},"2024-06-14":{"date":"2024-06-14","mood":52.5}}"#,
        )
        .await
        .unwrap();

    assert_eq!(ledger.today_mood().await.unwrap(), 100);
    let stats = ledger.weekly_stats().await.unwrap();
    assert!(stats.weekly_data.iter().all(|r| r.mood <= 100));
    assert_eq!(stats.weekly_data[5].mood, 53);
    // (5 * 50 + 53 + 100) / 7 = 57.57
    assert_eq!(stats.avg_mood, 58);
}

#[tokio::test]
async fn test_custom_storage_key() {
    let (ledger, store, _clock) = test_ledger();
    let ledger = ledger.with_storage_key("other_pet");

    ledger.record_feeding().await.unwrap();
    assert!(store.get("other_pet").await.unwrap().is_some());
    assert!(store.get(DEFAULT_STORAGE_KEY).await.unwrap().is_none());
}

#[tokio::test]
async fn test_store_write_failure_is_surfaced() {
    let mut store = MockStore::new();
    store.expect_get().returning(|_| Ok(None));
    store.expect_set().returning(|_, _| {
        Err(petpal_store::Error::Configuration("read-only".to_string()))
    });
    store.expect_backend().return_const("mock");

    let ledger = ActivityLedger::new(Arc::new(store));
    let err = ledger.record_feeding().await.unwrap_err();
    assert!(matches!(err, crate::Error::Store(_)));
}

#[tokio::test]
async fn test_weekly_stats_never_writes() {
    let mut store = MockStore::new();
    store.expect_get().returning(|_| Ok(None));
    store.expect_set().never();
    store.expect_backend().return_const("mock");

    let ledger = ActivityLedger::new(Arc::new(store))
        .with_clock(Arc::new(FixedClock::new(day(2024, 1, 3))));
    let stats = ledger.weekly_stats().await.unwrap();
    assert_eq!(stats.weekly_data[0].date, "2023-12-28");
}
