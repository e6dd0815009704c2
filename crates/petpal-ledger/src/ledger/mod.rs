//! ActivityLedger - read-modify-write façade over the stored activity log.

use crate::clock::{date_key, Clock, DateBasis, SystemClock};
use crate::error::Result;
use crate::record::ActivityRecord;
use crate::stats::{WeeklyStats, WINDOW_DAYS};
use crate::types::{Interaction, Mood, Reaction};
use chrono::{Duration, NaiveDate};
use petpal_store::KeyValueStore;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, warn};

#[cfg(test)]
mod tests;

/// Storage key holding the whole activity log.
pub const DEFAULT_STORAGE_KEY: &str = "pet_activity";

/// Stored shape: day key -> record.
type ActivityLog = BTreeMap<String, ActivityRecord>;

/// Ledger configuration (exposed to TOML)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerConfig {
    /// Key the activity log is stored under
    #[serde(default = "default_storage_key")]
    pub storage_key: String,
    /// Day boundary used to bucket events
    #[serde(default)]
    pub date_basis: DateBasis,
}

fn default_storage_key() -> String {
    DEFAULT_STORAGE_KEY.to_string()
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            storage_key: default_storage_key(),
            date_basis: DateBasis::default(),
        }
    }
}

/// Day-bucketed activity ledger.
///
/// Holds no state of its own: every call loads the full log from the store,
/// applies its change, and writes the full log back. Clones share the same
/// store and clock.
#[derive(Clone)]
pub struct ActivityLedger {
    store: Arc<dyn KeyValueStore>,
    clock: Arc<dyn Clock>,
    storage_key: String,
}

impl ActivityLedger {
    /// Create a ledger over `store` using the UTC wall clock.
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            clock: Arc::new(SystemClock::default()),
            storage_key: default_storage_key(),
        }
    }

    /// Create a ledger from configuration.
    pub fn from_config(store: Arc<dyn KeyValueStore>, config: &LedgerConfig) -> Self {
        Self::new(store)
            .with_clock(Arc::new(SystemClock::new(config.date_basis)))
            .with_storage_key(config.storage_key.clone())
    }

    /// Replace the day source.
    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Store the log under a different key.
    #[must_use]
    pub fn with_storage_key(mut self, key: impl Into<String>) -> Self {
        self.storage_key = key.into();
        self
    }

    /// Today's calendar day according to the ledger's clock.
    #[must_use]
    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    // ── Mutations ───────────────────────────────────────────────

    /// Count a feeding: `feeding += 1`, `hungry += 1`, mood +5.
    pub async fn record_feeding(&self) -> Result<ActivityRecord> {
        self.record_interaction(Interaction::Feeding).await
    }

    /// Count a play session: `playing += 1`, `excited += 1`, mood +10.
    pub async fn record_playing(&self) -> Result<ActivityRecord> {
        self.record_interaction(Interaction::Playing).await
    }

    /// Count a care action: `caring += 1`, `content += 1`, mood +7.
    pub async fn record_caring(&self) -> Result<ActivityRecord> {
        self.record_interaction(Interaction::Caring).await
    }

    /// Count any interaction into today's record.
    pub async fn record_interaction(&self, interaction: Interaction) -> Result<ActivityRecord> {
        self.update_today(|record| {
            match interaction {
                Interaction::Feeding => record.feeding += 1,
                Interaction::Playing => record.playing += 1,
                Interaction::Caring => record.caring += 1,
            }
            record.reactions.bump(interaction.reaction());
            record.apply_mood_delta(interaction.score_delta());
        })
        .await
    }

    /// Count a mood transition into its reaction bucket and adjust the score.
    pub async fn record_mood_change(&self, mood: Mood) -> Result<ActivityRecord> {
        self.update_today(|record| {
            record.reactions.bump(mood.reaction());
            record.apply_mood_delta(mood.score_delta());
        })
        .await
    }

    /// String entry point for mood transitions.
    ///
    /// Unknown labels are logged and ignored; `Ok(None)` is returned and the
    /// stored log is left untouched.
    pub async fn record_mood_label(&self, label: &str) -> Result<Option<ActivityRecord>> {
        match label.parse::<Mood>() {
            Ok(mood) => self.record_mood_change(mood).await.map(Some),
            Err(e) => {
                warn!(label, error = %e, "Ignoring mood change with unknown label");
                Ok(None)
            }
        }
    }

    /// Count the pet being ignored: `sleepy += 1`, mood −2.
    pub async fn record_ignore(&self) -> Result<ActivityRecord> {
        self.update_today(|record| {
            record.reactions.bump(Reaction::Sleepy);
            record.apply_mood_delta(-2);
        })
        .await
    }

    // ── Queries ─────────────────────────────────────────────────

    /// Summarize the trailing seven days, today inclusive.
    ///
    /// Never writes. Days without a stored record are filled with defaults.
    pub async fn weekly_stats(&self) -> Result<WeeklyStats> {
        let log = self.load().await?;
        let today = self.clock.today();

        let weekly_data = (0..WINDOW_DAYS as i64)
            .rev()
            .map(|offset| {
                let day = today - Duration::days(offset);
                log.get(&date_key(day))
                    .cloned()
                    .unwrap_or_else(|| ActivityRecord::new(day))
            })
            .collect();

        Ok(WeeklyStats::from_window(weekly_data))
    }

    /// Today's mood score.
    ///
    /// Materializes and persists today's default record if none exists yet.
    pub async fn today_mood(&self) -> Result<u8> {
        let mut log = self.load().await?;
        let today = self.clock.today();
        let key = date_key(today);

        if let Some(record) = log.get(&key) {
            return Ok(record.mood);
        }

        let record = ActivityRecord::new(today);
        let mood = record.mood;
        log.insert(key, record);
        self.save(&log).await?;
        Ok(mood)
    }

    /// Record for a given day, synthesized (not persisted) if absent.
    pub async fn record_for(&self, day: NaiveDate) -> Result<ActivityRecord> {
        let log = self.load().await?;
        Ok(log
            .get(&date_key(day))
            .cloned()
            .unwrap_or_else(|| ActivityRecord::new(day)))
    }

    // ── Storage boundary ────────────────────────────────────────

    async fn update_today<F>(&self, apply: F) -> Result<ActivityRecord>
    where
        F: FnOnce(&mut ActivityRecord),
    {
        let mut log = self.load().await?;
        let today = self.clock.today();

        let record = log
            .entry(date_key(today))
            .or_insert_with(|| ActivityRecord::new(today));
        apply(record);
        let updated = record.clone();

        self.save(&log).await?;
        debug!(
            date = %updated.date,
            mood = updated.mood,
            feeding = updated.feeding,
            playing = updated.playing,
            caring = updated.caring,
            "Activity record updated"
        );
        Ok(updated)
    }

    /// Only unparsable JSON discards the whole log; a bad day entry is
    /// dropped on its own so the other days survive the next write.
    async fn load(&self) -> Result<ActivityLog> {
        let Some(raw) = self.store.get(&self.storage_key).await? else {
            return Ok(ActivityLog::new());
        };

        let entries: BTreeMap<String, serde_json::Value> = match serde_json::from_str(&raw) {
            Ok(entries) => entries,
            Err(e) => {
                warn!(
                    key = %self.storage_key,
                    backend = self.store.backend(),
                    error = %e,
                    "Discarding unparsable activity log"
                );
                return Ok(ActivityLog::new());
            }
        };

        let mut log = ActivityLog::new();
        for (day, value) in entries {
            match serde_json::from_value::<ActivityRecord>(value) {
                Ok(mut record) => {
                    // The map key is authoritative for the day.
                    record.date.clone_from(&day);
                    log.insert(day, record);
                }
                Err(e) => {
                    warn!(
                        key = %self.storage_key,
                        day = %day,
                        error = %e,
                        "Dropping malformed activity record"
                    );
                }
            }
        }
        Ok(log)
    }

    async fn save(&self, log: &ActivityLog) -> Result<()> {
        let raw = serde_json::to_string(log)?;
        self.store.set(&self.storage_key, &raw).await?;
        Ok(())
    }
}

impl std::fmt::Debug for ActivityLedger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActivityLedger")
            .field("backend", &self.store.backend())
            .field("clock", &self.clock)
            .field("storage_key", &self.storage_key)
            .finish()
    }
}
