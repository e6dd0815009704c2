//! Shared vocabulary: moods, reactions and interactions.
//!
//! These are the contracts between the mood engine and the ledger. The
//! score deltas live here so both sides agree on them.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A label that is not part of the fixed vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown label: {0}")]
pub struct UnknownLabel(pub String);

/// The pet's displayed emotional state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    /// Resting state
    #[default]
    Neutral,
    /// Transient reaction to an action
    Happy,
    /// Ignored for too long
    Sad,
    /// Fed three times in a row
    Overfed,
}

impl Mood {
    /// All moods, in display order.
    pub const ALL: [Mood; 4] = [Mood::Happy, Mood::Sad, Mood::Overfed, Mood::Neutral];

    /// Lowercase label
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Neutral => "neutral",
            Self::Happy => "happy",
            Self::Sad => "sad",
            Self::Overfed => "overfed",
        }
    }

    /// Reaction bucket counted when the pet enters this mood.
    #[must_use]
    pub fn reaction(&self) -> Reaction {
        match self {
            Self::Neutral => Reaction::Content,
            Self::Happy => Reaction::Happy,
            Self::Sad => Reaction::Sad,
            Self::Overfed => Reaction::Overfed,
        }
    }

    /// Change applied to the day's mood score when the pet enters this mood.
    #[must_use]
    pub fn score_delta(&self) -> i32 {
        match self {
            Self::Neutral => 0,
            Self::Happy => 2,
            Self::Sad => -5,
            Self::Overfed => -3,
        }
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mood {
    type Err = UnknownLabel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "neutral" => Ok(Self::Neutral),
            "happy" => Ok(Self::Happy),
            "sad" => Ok(Self::Sad),
            "overfed" => Ok(Self::Overfed),
            _ => Err(UnknownLabel(s.to_string())),
        }
    }
}

/// Emotion labels counted in an activity record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Reaction {
    /// Entered the happy mood
    Happy,
    /// Played with
    Excited,
    /// Cared for, or settled back to neutral
    Content,
    /// Ignored
    Sleepy,
    /// Fed
    Hungry,
    /// Entered the sad mood
    Sad,
    /// Entered the overfed mood
    Overfed,
}

impl Reaction {
    /// The fixed label set, in storage order.
    pub const ALL: [Reaction; 7] = [
        Reaction::Happy,
        Reaction::Excited,
        Reaction::Content,
        Reaction::Sleepy,
        Reaction::Hungry,
        Reaction::Sad,
        Reaction::Overfed,
    ];

    /// Lowercase label
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Happy => "happy",
            Self::Excited => "excited",
            Self::Content => "content",
            Self::Sleepy => "sleepy",
            Self::Hungry => "hungry",
            Self::Sad => "sad",
            Self::Overfed => "overfed",
        }
    }
}

impl fmt::Display for Reaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Reaction {
    type Err = UnknownLabel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|r| r.as_str() == s)
            .ok_or_else(|| UnknownLabel(s.to_string()))
    }
}

/// A player action counted by the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Interaction {
    /// Feed the pet
    Feeding,
    /// Play with the pet
    Playing,
    /// Care for the pet
    Caring,
}

impl Interaction {
    /// Reaction bucket bumped by this interaction.
    #[must_use]
    pub fn reaction(&self) -> Reaction {
        match self {
            Self::Feeding => Reaction::Hungry,
            Self::Playing => Reaction::Excited,
            Self::Caring => Reaction::Content,
        }
    }

    /// Change applied to the day's mood score.
    #[must_use]
    pub fn score_delta(&self) -> i32 {
        match self {
            Self::Feeding => 5,
            Self::Playing => 10,
            Self::Caring => 7,
        }
    }

    /// Lowercase label
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Feeding => "feeding",
            Self::Playing => "playing",
            Self::Caring => "caring",
        }
    }
}

impl fmt::Display for Interaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mood_labels() {
        for mood in Mood::ALL {
            assert_eq!(mood.as_str().parse::<Mood>().unwrap(), mood);
        }
        assert_eq!(" Happy ".parse::<Mood>().unwrap(), Mood::Happy);
        assert_eq!(
            "grumpy".parse::<Mood>().unwrap_err(),
            UnknownLabel("grumpy".to_string())
        );
    }

    #[test]
    fn test_neutral_maps_to_content() {
        assert_eq!(Mood::Neutral.reaction(), Reaction::Content);
        assert_eq!(Mood::Neutral.score_delta(), 0);
    }

    #[test]
    fn test_interaction_reactions() {
        assert_eq!(Interaction::Feeding.reaction(), Reaction::Hungry);
        assert_eq!(Interaction::Playing.reaction(), Reaction::Excited);
        assert_eq!(Interaction::Caring.reaction(), Reaction::Content);
    }

    #[test]
    fn test_mood_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Mood::Overfed).unwrap(), "\"overfed\"");
    }
}
