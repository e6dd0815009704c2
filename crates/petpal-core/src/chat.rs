//! Canned chat replies
//!
//! Matching is plain case-insensitive substring search, checked in
//! category order, so "this" counts as a greeting.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Reply categories, in match order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseCategory {
    /// hello / hi / hey
    Greetings,
    /// anything with a question mark
    Questions,
    /// good / great / amazing / love
    Compliments,
    /// play / walk / fun
    Activities,
    /// everything else
    Other,
}

impl ResponseCategory {
    const MATCHERS: [(ResponseCategory, &'static [&'static str]); 4] = [
        (Self::Greetings, &["hello", "hi", "hey"]),
        (Self::Questions, &["?"]),
        (Self::Compliments, &["good", "great", "amazing", "love"]),
        (Self::Activities, &["play", "walk", "fun"]),
    ];

    /// Category for `message`
    #[must_use]
    pub fn classify(message: &str) -> Self {
        let lower = message.to_lowercase();
        Self::MATCHERS
            .iter()
            .find(|(_, needles)| needles.iter().any(|n| lower.contains(n)))
            .map_or(Self::Other, |(category, _)| *category)
    }

    /// Canned replies for this category
    #[must_use]
    pub fn responses(&self) -> &'static [&'static str] {
        match self {
            Self::Greetings => &[
                "Hello there! 🌟",
                "Woof! Great to see you!",
                "Purr... I missed you!",
                "Ready for some fun!",
            ],
            Self::Questions => &[
                "That's interesting! Tell me more",
                "I love learning new things!",
                "Wow, really?",
                "You're so smart!",
            ],
            Self::Compliments => &[
                "You're the best! ❤️",
                "That makes me so happy!",
                "You always know what to say!",
                "I'm lucky to have you!",
            ],
            Self::Activities => &[
                "Let's play together!",
                "Adventures are the best!",
                "I'm ready for anything!",
                "This is going to be fun!",
            ],
            Self::Other => &[
                "Hmm... *tilts head*",
                "I'm listening!",
                "Go on...",
                "That sounds nice!",
            ],
        }
    }
}

impl fmt::Display for ResponseCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Greetings => write!(f, "greetings"),
            Self::Questions => write!(f, "questions"),
            Self::Compliments => write!(f, "compliments"),
            Self::Activities => write!(f, "activities"),
            Self::Other => write!(f, "other"),
        }
    }
}

/// Who said it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatSender {
    /// The player
    User,
    /// The pet
    Pet,
}

/// One line of conversation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Author
    pub sender: ChatSender,
    /// Text
    pub text: String,
}

/// A pet reply
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatReply {
    /// Matched category
    pub category: ResponseCategory,
    /// Reply text
    pub text: String,
}

/// Conversation with the pet, keeping its history.
#[derive(Debug)]
pub struct PetChat<R = StdRng> {
    rng: R,
    history: Vec<ChatMessage>,
}

impl PetChat<StdRng> {
    /// Chat with an entropy-seeded RNG
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }
}

impl Default for PetChat<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> PetChat<R> {
    /// Chat with a caller-provided RNG
    pub fn with_rng(rng: R) -> Self {
        Self {
            rng,
            history: Vec::new(),
        }
    }

    /// Record `message` and answer it. Blank messages get no reply and are
    /// not recorded.
    pub fn reply(&mut self, message: &str) -> Option<ChatReply> {
        let message = message.trim();
        if message.is_empty() {
            return None;
        }

        self.history.push(ChatMessage {
            sender: ChatSender::User,
            text: message.to_string(),
        });

        let category = ResponseCategory::classify(message);
        let text = category
            .responses()
            .choose(&mut self.rng)
            .copied()
            .unwrap_or_default()
            .to_string();

        self.push_pet_message(text.clone());
        Some(ChatReply { category, text })
    }

    /// Add an unprompted pet line, e.g. a walk's arrival message
    pub fn push_pet_message(&mut self, text: impl Into<String>) {
        self.history.push(ChatMessage {
            sender: ChatSender::Pet,
            text: text.into(),
        });
    }

    /// Conversation so far, oldest first
    #[must_use]
    pub fn history(&self) -> &[ChatMessage] {
        &self.history
    }
}
