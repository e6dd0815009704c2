//! EventBus - broadcast of pet events to the display layer.
//!
//! Mood sessions and walks publish here so that any number of renderers
//! (the terminal loop, tests) can follow state changes without polling.

use crate::mood::PetAction;
use crate::walk::WalkLocation;
use petpal_ledger::Mood;
use serde::Serialize;
use tokio::sync::broadcast;
use uuid::Uuid;

/// Events emitted by sessions and activities.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PetEvent {
    /// A player action was accepted
    ActionApplied {
        /// Mood session identifier
        session_id: Uuid,
        /// Applied action
        action: PetAction,
        /// Feed count after the action
        feed_count: u8,
    },
    /// The displayed mood changed
    MoodChanged {
        /// Mood session identifier
        session_id: Uuid,
        /// Previous mood
        from: Mood,
        /// New mood
        to: Mood,
    },
    /// The pet crossed the ignore threshold
    Ignored {
        /// Mood session identifier
        session_id: Uuid,
    },
    /// A walk advanced
    WalkProgress {
        /// Walk destination
        location: WalkLocation,
        /// Progress in percent
        progress: u8,
    },
    /// A walk reached 100%
    WalkCompleted {
        /// Walk destination
        location: WalkLocation,
    },
}

impl PetEvent {
    /// Short event name, matching the serialized `type` tag
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::ActionApplied { .. } => "action_applied",
            Self::MoodChanged { .. } => "mood_changed",
            Self::Ignored { .. } => "ignored",
            Self::WalkProgress { .. } => "walk_progress",
            Self::WalkCompleted { .. } => "walk_completed",
        }
    }

    /// Mood session the event belongs to, if any
    #[must_use]
    pub fn session_id(&self) -> Option<Uuid> {
        match self {
            Self::ActionApplied { session_id, .. }
            | Self::MoodChanged { session_id, .. }
            | Self::Ignored { session_id } => Some(*session_id),
            Self::WalkProgress { .. } | Self::WalkCompleted { .. } => None,
        }
    }
}

/// Broadcast-based event bus.
///
/// Cloning is cheap; all clones share the same channel.
#[derive(Debug, Clone)]
pub struct EventBus {
    sender: broadcast::Sender<PetEvent>,
}

impl EventBus {
    /// Create a bus that buffers up to `capacity` events per lagging subscriber
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Subscribe to all subsequent events
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<PetEvent> {
        self.sender.subscribe()
    }

    /// Publish an event, returning the number of receivers reached.
    pub fn publish(&self, event: PetEvent) -> usize {
        // No receivers is not an error
        self.sender.send(event).unwrap_or(0)
    }

    /// Number of live subscribers
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(256)
    }
}
