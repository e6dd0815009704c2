//! PetPal Ledger - day-bucketed activity tracking
//!
//! Every feed/play/care action and every mood transition of a pet is counted
//! into the record for the current calendar day. The ledger keeps one JSON
//! mapping `date -> ActivityRecord` under a single storage key and rewrites
//! the whole mapping on each update.
//!
//! # Architecture
//!
//! ```text
//! MoodSession ──► ActivityLedger ──► KeyValueStore ("pet_activity")
//!                      │
//!                      └──► WeeklyStats (7-day window, read-only)
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod clock;
pub mod error;
mod ledger;
pub mod record;
pub mod stats;
pub mod types;

pub use clock::{date_key, Clock, DateBasis, FixedClock, SystemClock};
pub use error::{Error, Result};
pub use ledger::{ActivityLedger, LedgerConfig, DEFAULT_STORAGE_KEY};
pub use record::{ActivityRecord, Reactions, DEFAULT_MOOD_SCORE};
pub use stats::{WeeklyStats, WINDOW_DAYS};
pub use types::{Interaction, Mood, Reaction, UnknownLabel};
