//! Weekly aggregation over activity records.

use crate::record::{ActivityRecord, Reactions, DEFAULT_MOOD_SCORE};
use serde::Serialize;

/// Number of days in the rolling window.
pub const WINDOW_DAYS: usize = 7;

/// Read-only summary of the trailing week.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeeklyStats {
    /// Feedings across the window
    pub total_feedings: u32,
    /// Play sessions across the window
    pub total_playing: u32,
    /// Care actions across the window
    pub total_caring: u32,
    /// Mean mood score, rounded to the nearest integer
    pub avg_mood: u8,
    /// One record per day, oldest first, today last
    pub weekly_data: Vec<ActivityRecord>,
    /// Reaction counts merged across the window
    pub all_time_reactions: Reactions,
}

impl WeeklyStats {
    /// Summarize an ordered window of records.
    #[must_use]
    pub fn from_window(weekly_data: Vec<ActivityRecord>) -> Self {
        let mut all_time_reactions = Reactions::default();
        let (mut feedings, mut playing, mut caring, mut mood_sum) = (0u32, 0u32, 0u32, 0u32);

        for day in &weekly_data {
            feedings += day.feeding;
            playing += day.playing;
            caring += day.caring;
            mood_sum += u32::from(day.mood);
            all_time_reactions.merge(&day.reactions);
        }

        let avg_mood = if weekly_data.is_empty() {
            DEFAULT_MOOD_SCORE
        } else {
            // f64::round rounds halves away from zero; the sum is never negative.
            (f64::from(mood_sum) / weekly_data.len() as f64).round() as u8
        };

        Self {
            total_feedings: feedings,
            total_playing: playing,
            total_caring: caring,
            avg_mood,
            weekly_data,
            all_time_reactions,
        }
    }

    /// Today's record (the last entry of the window)
    #[must_use]
    pub fn today(&self) -> Option<&ActivityRecord> {
        self.weekly_data.last()
    }

    /// Feed + play + care across the window
    #[must_use]
    pub fn total_interactions(&self) -> u32 {
        self.total_feedings + self.total_playing + self.total_caring
    }
}
