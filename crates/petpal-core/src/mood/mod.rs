//! Mood - per-session pet mood simulation
//!
//! # Architecture
//!
//! ```text
//! feed/play/care ──► MoodHandle ──mpsc──► session task
//!                                            │
//!                              MoodMachine (state + deadlines)
//!                                            │
//!                  ┌─────────────────────────┼──────────────────┐
//!                  ▼                         ▼                  ▼
//!          ActivityReporter          watch<MoodSnapshot>     EventBus
//!          (ActivityLedger)          (display redraws)      (PetEvent)
//! ```
//!
//! The machine is pure: it takes the current instant as input and owns every
//! pending deadline (poll, revert-to-neutral, overfed clear). The session task
//! is the only place that mutates it, so timers cannot race each other.
//!
//! Transition precedence, highest first: saturation (overfed) > ignore
//! timeout (sad) > explicit action (happy, transient) > neutral.

mod config;
mod machine;
mod reporter;
mod session;

#[cfg(test)]
mod tests;

pub use config::MoodConfig;
pub use machine::{MoodMachine, MoodSnapshot, PetAction, Transition, FEED_SATURATION};
pub use reporter::{ActivityReporter, NoopReporter};
pub use session::{MoodHandle, MoodSession, MoodSessionBuilder};
