//! Walk activity
//!
//! A walk ticks its progress from 0 to 100 and then reports a completion
//! message. Progress is observable through a watch channel and the event bus.

use crate::error::{Error, Result};
use crate::event_bus::{EventBus, PetEvent};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Walk destinations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WalkLocation {
    /// Park
    Park,
    /// Beach
    Beach,
    /// Forest
    Forest,
    /// City
    City,
    /// Mountains
    Mountains,
    /// Lake
    Lake,
}

impl WalkLocation {
    /// Every location, in display order
    pub const ALL: [WalkLocation; 6] = [
        Self::Park,
        Self::Beach,
        Self::Forest,
        Self::City,
        Self::Mountains,
        Self::Lake,
    ];

    /// Display name
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Park => "Park",
            Self::Beach => "Beach",
            Self::Forest => "Forest",
            Self::City => "City",
            Self::Mountains => "Mountains",
            Self::Lake => "Lake",
        }
    }
}

impl fmt::Display for WalkLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WalkLocation {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|loc| loc.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| Error::UnknownLocation(s.to_string()))
    }
}

/// Walk pacing (exposed to TOML)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalkConfig {
    /// Milliseconds between progress ticks
    #[serde(default = "default_tick_ms")]
    pub tick_ms: u64,
    /// Percentage points gained per tick
    #[serde(default = "default_step")]
    pub step: u8,
}

fn default_tick_ms() -> u64 {
    100
}
fn default_step() -> u8 {
    2
}

impl Default for WalkConfig {
    fn default() -> Self {
        Self {
            tick_ms: default_tick_ms(),
            step: default_step(),
        }
    }
}

impl WalkConfig {
    /// Reject pacing that would never finish.
    pub fn validate(&self) -> Result<()> {
        if self.step == 0 {
            return Err(Error::InvalidConfig {
                field: "walk.step",
                message: "must be greater than zero".to_string(),
            });
        }
        if self.tick_ms == 0 {
            return Err(Error::InvalidConfig {
                field: "walk.tick_ms",
                message: "must be greater than zero".to_string(),
            });
        }
        Ok(())
    }

    /// Tick period
    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }
}

/// Result of a finished walk
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WalkSummary {
    /// Destination
    pub location: WalkLocation,
    /// Ticks taken to reach 100%
    pub ticks: u32,
    /// Message the pet says on arrival
    pub message: String,
}

/// A single walk.
#[derive(Debug)]
pub struct Walk {
    location: WalkLocation,
    config: WalkConfig,
    events: Option<EventBus>,
    progress: watch::Sender<u8>,
}

impl Walk {
    /// Prepare a walk to `location`
    pub fn new(location: WalkLocation, config: WalkConfig) -> Self {
        let (progress, _) = watch::channel(0);
        Self {
            location,
            config,
            events: None,
            progress,
        }
    }

    /// Also publish progress on `bus`
    pub fn with_event_bus(mut self, bus: EventBus) -> Self {
        self.events = Some(bus);
        self
    }

    /// Destination
    #[must_use]
    pub fn location(&self) -> WalkLocation {
        self.location
    }

    /// Receiver for progress updates (0..=100)
    #[must_use]
    pub fn progress(&self) -> watch::Receiver<u8> {
        self.progress.subscribe()
    }

    /// Arrival message for `location`
    #[must_use]
    pub fn completion_message(location: WalkLocation) -> String {
        format!("That was a great walk in the {location}! I feel so refreshed! 🌟")
    }

    /// Tick until progress reaches 100, or fail with
    /// [`Error::WalkCancelled`] once `cancel` fires.
    pub async fn run(self, cancel: CancellationToken) -> Result<WalkSummary> {
        self.config.validate()?;

        let tick = self.config.tick();
        let mut ticker = interval_at(Instant::now() + tick, tick);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let mut current: u8 = 0;
        let mut ticks: u32 = 0;
        info!(location = %self.location, "Walk started");

        while current < 100 {
            tokio::select! {
                biased;

                _ = cancel.cancelled() => {
                    info!(location = %self.location, progress = current, "Walk cancelled");
                    return Err(Error::WalkCancelled { progress: current });
                }

                _ = ticker.tick() => {
                    current = current.saturating_add(self.config.step).min(100);
                    ticks += 1;
                    self.progress.send_replace(current);
                    if let Some(bus) = &self.events {
                        bus.publish(PetEvent::WalkProgress {
                            location: self.location,
                            progress: current,
                        });
                    }
                    debug!(location = %self.location, progress = current, "Walk progress");
                }
            }
        }

        if let Some(bus) = &self.events {
            bus.publish(PetEvent::WalkCompleted {
                location: self.location,
            });
        }
        info!(location = %self.location, ticks, "Walk completed");

        Ok(WalkSummary {
            location: self.location,
            ticks,
            message: Self::completion_message(self.location),
        })
    }
}
