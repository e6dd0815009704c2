//! PetPal Core - virtual pet behaviour
//!
//! This crate provides the behavioural core of the pet, including:
//! - Mood: the per-session mood state machine and its timer driver
//! - Catalog: the available pets and the persisted selection
//! - Walk: the simulated walk activity
//! - Chat: canned pet replies
//! - EventBus: broadcast of session and activity events to the display layer
//!
//! Activity accounting lives in `petpal-ledger`; the mood session reports
//! into it through the [`ActivityReporter`] seam.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod catalog;
pub mod chat;
pub mod error;
pub mod event_bus;
pub mod mood;
pub mod walk;

pub use catalog::{
    available_pets, default_pet, find_pet, PetProfile, PetSelection, SELECTED_PET_KEY,
};
pub use chat::{ChatMessage, ChatReply, ChatSender, PetChat, ResponseCategory};
pub use error::{Error, Result};
pub use event_bus::{EventBus, PetEvent};
pub use mood::{
    ActivityReporter, MoodConfig, MoodHandle, MoodMachine, MoodSession, MoodSessionBuilder,
    MoodSnapshot, NoopReporter, PetAction, Transition, FEED_SATURATION,
};
pub use walk::{Walk, WalkConfig, WalkLocation, WalkSummary};

pub use petpal_ledger::Mood;
