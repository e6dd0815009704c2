//! Per-day activity record.

use crate::clock::date_key;
use crate::types::Reaction;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// Mood score of a freshly created day.
pub const DEFAULT_MOOD_SCORE: u8 = 50;

/// Upper bound of the mood score.
const MAX_MOOD_SCORE: i32 = 100;

/// Reaction counts keyed by label.
///
/// Stored as a plain JSON object. Labels outside the fixed set are kept as
/// they were read so that merging never drops data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Reactions(BTreeMap<String, u32>);

impl Default for Reactions {
    fn default() -> Self {
        Self(
            Reaction::ALL
                .iter()
                .map(|r| (r.as_str().to_string(), 0))
                .collect(),
        )
    }
}

impl Reactions {
    /// Increment one bucket
    pub fn bump(&mut self, reaction: Reaction) {
        *self.0.entry(reaction.as_str().to_string()).or_insert(0) += 1;
    }

    /// Count for a fixed label
    #[must_use]
    pub fn get(&self, reaction: Reaction) -> u32 {
        self.get_label(reaction.as_str())
    }

    /// Count for any label
    #[must_use]
    pub fn get_label(&self, label: &str) -> u32 {
        self.0.get(label).copied().unwrap_or(0)
    }

    /// Add every bucket of `other` into this one
    pub fn merge(&mut self, other: &Reactions) {
        for (label, count) in &other.0 {
            *self.0.entry(label.clone()).or_insert(0) += count;
        }
    }

    /// Iterate `(label, count)` in label order
    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Buckets with a non-zero count
    pub fn nonzero(&self) -> impl Iterator<Item = (&str, u32)> {
        self.iter().filter(|(_, count)| *count > 0)
    }

    /// Sum of all buckets
    #[must_use]
    pub fn total(&self) -> u32 {
        self.0.values().sum()
    }
}

/// Counters and mood score for one calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityRecord {
    /// Day key (`YYYY-MM-DD`)
    #[serde(default)]
    pub date: String,
    /// Number of feedings
    #[serde(default)]
    pub feeding: u32,
    /// Number of play sessions
    #[serde(default)]
    pub playing: u32,
    /// Number of care actions
    #[serde(default)]
    pub caring: u32,
    /// Running happiness score in [0, 100]
    #[serde(default = "default_mood", deserialize_with = "deserialize_mood")]
    pub mood: u8,
    /// Emotion occurrence counts
    #[serde(default)]
    pub reactions: Reactions,
}

fn default_mood() -> u8 {
    DEFAULT_MOOD_SCORE
}

/// Accepts any JSON number (or null) and clamps it into [0, 100].
fn deserialize_mood<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<f64>::deserialize(deserializer)?;
    Ok(match raw {
        Some(score) if score.is_finite() => {
            score.round().clamp(0.0, f64::from(MAX_MOOD_SCORE)) as u8
        }
        _ => DEFAULT_MOOD_SCORE,
    })
}

impl ActivityRecord {
    /// Empty record for `date`
    #[must_use]
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date: date_key(date),
            feeding: 0,
            playing: 0,
            caring: 0,
            mood: DEFAULT_MOOD_SCORE,
            reactions: Reactions::default(),
        }
    }

    /// Shift the mood score by `delta`, clamped to [0, 100].
    pub fn apply_mood_delta(&mut self, delta: i32) {
        let next = (i32::from(self.mood) + delta).clamp(0, MAX_MOOD_SCORE);
        self.mood = next as u8;
    }

    /// Parsed day, if the stored key is well formed
    #[must_use]
    pub fn day(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.date, "%Y-%m-%d").ok()
    }

    /// Short weekday name (`Sun`..`Sat`) for chart axes
    #[must_use]
    pub fn weekday_label(&self) -> Option<&'static str> {
        const NAMES: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];
        self.day()
            .map(|d| NAMES[d.weekday().num_days_from_sunday() as usize])
    }

    /// Total feed/play/care actions
    #[must_use]
    pub fn interactions(&self) -> u32 {
        self.feeding + self.playing + self.caring
    }
}
