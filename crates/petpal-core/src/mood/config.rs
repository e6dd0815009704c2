//! Mood timing configuration

use crate::error::{Error, Result};
use crate::mood::machine::PetAction;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Mood timings, expressed in units of `unit_ms` (exposed to TOML)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoodConfig {
    /// Length of one time unit in milliseconds
    #[serde(default = "default_unit_ms")]
    pub unit_ms: u64,
    /// Interval between ignore checks
    #[serde(default = "default_poll_units")]
    pub poll_units: u32,
    /// Idle time after which the pet counts as ignored (strictly exceeded)
    #[serde(default = "default_ignore_after_units")]
    pub ignore_after_units: u32,
    /// How long the pet stays happy after a feed
    #[serde(default = "default_feed_happy_units")]
    pub feed_happy_units: u32,
    /// How long the pet stays happy after playing
    #[serde(default = "default_play_happy_units")]
    pub play_happy_units: u32,
    /// How long the pet stays happy after care
    #[serde(default = "default_care_happy_units")]
    pub care_happy_units: u32,
    /// How long saturation lasts before the feed count resets
    #[serde(default = "default_overfed_clear_units")]
    pub overfed_clear_units: u32,
}

fn default_unit_ms() -> u64 {
    1000
}
fn default_poll_units() -> u32 {
    2
}
fn default_ignore_after_units() -> u32 {
    10
}
fn default_feed_happy_units() -> u32 {
    3
}
fn default_play_happy_units() -> u32 {
    4
}
fn default_care_happy_units() -> u32 {
    3
}
fn default_overfed_clear_units() -> u32 {
    8
}

impl Default for MoodConfig {
    fn default() -> Self {
        Self {
            unit_ms: default_unit_ms(),
            poll_units: default_poll_units(),
            ignore_after_units: default_ignore_after_units(),
            feed_happy_units: default_feed_happy_units(),
            play_happy_units: default_play_happy_units(),
            care_happy_units: default_care_happy_units(),
            overfed_clear_units: default_overfed_clear_units(),
        }
    }
}

impl MoodConfig {
    /// Create a configuration with default timings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the unit length
    pub fn with_unit(mut self, unit: Duration) -> Self {
        self.unit_ms = unit.as_millis() as u64;
        self
    }

    /// Reject timings the session cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.unit_ms == 0 {
            return Err(Error::InvalidConfig {
                field: "mood.unit_ms",
                message: "must be greater than zero".to_string(),
            });
        }
        if self.poll_units == 0 {
            return Err(Error::InvalidConfig {
                field: "mood.poll_units",
                message: "must be greater than zero".to_string(),
            });
        }
        Ok(())
    }

    fn units(&self, n: u32) -> Duration {
        Duration::from_millis(self.unit_ms.saturating_mul(u64::from(n)))
    }

    /// One time unit
    pub fn unit(&self) -> Duration {
        self.units(1)
    }

    /// Interval between ignore checks
    pub fn poll_interval(&self) -> Duration {
        self.units(self.poll_units)
    }

    /// Ignore threshold
    pub fn ignore_after(&self) -> Duration {
        self.units(self.ignore_after_units)
    }

    /// Happy display duration after `action`
    pub fn happy_hold(&self, action: PetAction) -> Duration {
        match action {
            PetAction::Feed => self.units(self.feed_happy_units),
            PetAction::Play => self.units(self.play_happy_units),
            PetAction::Care => self.units(self.care_happy_units),
        }
    }

    /// Saturation duration
    pub fn overfed_clear(&self) -> Duration {
        self.units(self.overfed_clear_units)
    }
}
