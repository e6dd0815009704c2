//! Pure mood state machine.
//!
//! The machine never reads the clock; callers pass `now` into every step.

use crate::error::{Error, Result};
use crate::mood::config::MoodConfig;
use petpal_ledger::{Interaction, Mood};
use serde::{Deserialize, Serialize};
use std::fmt;
use tokio::time::Instant;

/// Feed count at which the pet becomes overfed.
pub const FEED_SATURATION: u8 = 3;

/// Player actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PetAction {
    /// Give food
    Feed,
    /// Play together
    Play,
    /// Pet, groom, cuddle
    Care,
}

impl PetAction {
    /// Ledger interaction counted for this action
    #[must_use]
    pub fn interaction(&self) -> Interaction {
        match self {
            Self::Feed => Interaction::Feeding,
            Self::Play => Interaction::Playing,
            Self::Care => Interaction::Caring,
        }
    }
}

impl fmt::Display for PetAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Feed => write!(f, "feed"),
            Self::Play => write!(f, "play"),
            Self::Care => write!(f, "care"),
        }
    }
}

/// Read-only view of the session state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct MoodSnapshot {
    /// Current mood
    pub mood: Mood,
    /// Whether the ignore threshold has been crossed since the last action
    pub ignored: bool,
    /// Feeds since the last reset, in [0, 3]
    pub feed_count: u8,
}

impl MoodSnapshot {
    /// Whether `feed` would currently be accepted
    #[must_use]
    pub fn can_feed(&self) -> bool {
        self.feed_count < FEED_SATURATION
    }
}

/// Everything that changed in one step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Transition {
    /// Action applied in this step
    pub action: Option<PetAction>,
    /// `(from, to)` when the displayed mood changed
    pub mood_change: Option<(Mood, Mood)>,
    /// The pet crossed the ignore threshold in this step
    pub became_ignored: bool,
}

impl Transition {
    /// Nothing observable happened
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.action.is_none() && self.mood_change.is_none() && !self.became_ignored
    }
}

/// Mood state plus every pending deadline.
///
/// Arming a deadline replaces the previous one, so a superseded
/// revert-to-neutral can never fire.
#[derive(Debug, Clone)]
pub struct MoodMachine {
    config: MoodConfig,
    mood: Mood,
    feed_count: u8,
    ignored: bool,
    last_interaction_at: Instant,
    next_poll_at: Instant,
    revert_at: Option<Instant>,
    overfed_clear_at: Option<Instant>,
}

impl MoodMachine {
    /// Fresh neutral pet; the idle clock starts at `now`.
    pub fn new(config: MoodConfig, now: Instant) -> Self {
        let next_poll_at = now + config.poll_interval();
        Self {
            config,
            mood: Mood::Neutral,
            feed_count: 0,
            ignored: false,
            last_interaction_at: now,
            next_poll_at,
            revert_at: None,
            overfed_clear_at: None,
        }
    }

    /// Current state
    #[must_use]
    pub fn snapshot(&self) -> MoodSnapshot {
        MoodSnapshot {
            mood: self.mood,
            ignored: self.ignored,
            feed_count: self.feed_count,
        }
    }

    /// Instant of the most recent action (or of creation)
    #[must_use]
    pub fn last_interaction_at(&self) -> Instant {
        self.last_interaction_at
    }

    /// Earliest instant at which [`advance`](Self::advance) has work to do.
    #[must_use]
    pub fn next_deadline(&self) -> Instant {
        [self.revert_at, self.overfed_clear_at]
            .into_iter()
            .flatten()
            .fold(self.next_poll_at, Instant::min)
    }

    /// Apply a player action at `now`.
    ///
    /// Feeding a saturated pet is rejected with [`Error::Overfed`] and leaves
    /// the state untouched.
    pub fn apply(&mut self, action: PetAction, now: Instant) -> Result<Transition> {
        let before = self.mood;

        match action {
            PetAction::Feed => {
                if self.feed_count >= FEED_SATURATION {
                    return Err(Error::Overfed);
                }
                let previous = self.feed_count;
                self.feed_count += 1;
                if previous + 1 >= FEED_SATURATION {
                    self.revert_at = None;
                    self.overfed_clear_at = Some(now + self.config.overfed_clear());
                } else {
                    self.revert_at = Some(now + self.config.happy_hold(action));
                }
            }
            PetAction::Play => {
                self.feed_count = 0;
                self.overfed_clear_at = None;
                self.revert_at = Some(now + self.config.happy_hold(action));
            }
            PetAction::Care => {
                self.revert_at = Some(now + self.config.happy_hold(action));
            }
        }

        self.ignored = false;
        self.last_interaction_at = now;
        // The ignore check restarts from the action.
        self.next_poll_at = now + self.config.poll_interval();

        Ok(Transition {
            action: Some(action),
            mood_change: self.settle(before),
            became_ignored: false,
        })
    }

    /// Fire every deadline that is due at `now`.
    pub fn advance(&mut self, now: Instant) -> Transition {
        let before = self.mood;
        let mut became_ignored = false;

        if self.overfed_clear_at.is_some_and(|at| now >= at) {
            self.overfed_clear_at = None;
            self.feed_count = 0;
        }

        if self.revert_at.is_some_and(|at| now >= at) {
            self.revert_at = None;
        }

        if now >= self.next_poll_at {
            let poll = self.config.poll_interval();
            while self.next_poll_at <= now {
                self.next_poll_at += poll;
            }

            if now.duration_since(self.last_interaction_at) > self.config.ignore_after() {
                became_ignored = !self.ignored;
                self.ignored = true;
                self.revert_at = None;
            }
        }

        Transition {
            action: None,
            mood_change: self.settle(before),
            became_ignored,
        }
    }

    fn resolve(&self) -> Mood {
        if self.feed_count >= FEED_SATURATION {
            Mood::Overfed
        } else if self.ignored {
            Mood::Sad
        } else if self.revert_at.is_some() {
            Mood::Happy
        } else {
            Mood::Neutral
        }
    }

    fn settle(&mut self, before: Mood) -> Option<(Mood, Mood)> {
        self.mood = self.resolve();
        (self.mood != before).then_some((before, self.mood))
    }
}
