//! Pet catalog and persisted pet selection

use crate::error::{Error, Result};
use petpal_ledger::Mood;
use petpal_store::KeyValueStore;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, LazyLock};
use tracing::{debug, warn};

/// Store key holding the selected pet
pub const SELECTED_PET_KEY: &str = "selected_pet";

/// A pet species and its emoji table.
///
/// The emoji are opaque display strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PetProfile {
    /// Stable identifier (`cat`, `dog`, ...)
    pub id: String,
    /// Display name
    pub name: String,
    /// Portrait
    pub emoji: String,
    /// Shown while happy
    pub happy_emoji: String,
    /// Shown while sad
    pub sad_emoji: String,
    /// Shown while overfed
    pub overfed_emoji: String,
    /// Shown while neutral
    pub neutral_emoji: String,
}

impl PetProfile {
    fn from_row(row: &CatalogRow) -> Self {
        let (id, name, emoji, happy, sad, overfed, neutral) = *row;
        Self {
            id: id.to_string(),
            name: name.to_string(),
            emoji: emoji.to_string(),
            happy_emoji: happy.to_string(),
            sad_emoji: sad.to_string(),
            overfed_emoji: overfed.to_string(),
            neutral_emoji: neutral.to_string(),
        }
    }

    /// Emoji to display for `mood`
    #[must_use]
    pub fn emoji_for(&self, mood: Mood) -> &str {
        match mood {
            Mood::Happy => &self.happy_emoji,
            Mood::Sad => &self.sad_emoji,
            Mood::Overfed => &self.overfed_emoji,
            Mood::Neutral => &self.neutral_emoji,
        }
    }
}

type CatalogRow = (
    &'static str,
    &'static str,
    &'static str,
    &'static str,
    &'static str,
    &'static str,
    &'static str,
);

// id, name, portrait, happy, sad, overfed, neutral
const CATALOG: [CatalogRow; 8] = [
    ("cat", "Cat", "🐱", "😸", "😿", "🤢", "🐱"),
    ("dog", "Dog", "🐶", "😄", "😢", "🤮", "🐶"),
    ("rabbit", "Rabbit", "🐰", "😊", "😭", "🤒", "🐰"),
    ("bear", "Bear", "🐻", "🤗", "😞", "🤢", "🐻"),
    ("panda", "Panda", "🐼", "😆", "😥", "🤮", "🐼"),
    ("lion", "Lion", "🦁", "😁", "😟", "🤢", "🦁"),
    ("fox", "Fox", "🦊", "😋", "😔", "🤒", "🦊"),
    ("koala", "Koala", "🐨", "😌", "😣", "🤮", "🐨"),
];

static PETS: LazyLock<Vec<PetProfile>> =
    LazyLock::new(|| CATALOG.iter().map(PetProfile::from_row).collect());

/// All selectable pets, in display order
#[must_use]
pub fn available_pets() -> &'static [PetProfile] {
    &PETS
}

/// Look up a pet by id (case-insensitive)
#[must_use]
pub fn find_pet(id: &str) -> Option<&'static PetProfile> {
    let id = id.trim();
    PETS.iter().find(|p| p.id.eq_ignore_ascii_case(id))
}

/// The pet used when nothing has been selected
#[must_use]
pub fn default_pet() -> &'static PetProfile {
    &PETS[0]
}

/// Persisted pet choice.
#[derive(Clone)]
pub struct PetSelection {
    store: Arc<dyn KeyValueStore>,
    key: String,
}

impl PetSelection {
    /// Selection stored under [`SELECTED_PET_KEY`]
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            key: SELECTED_PET_KEY.to_string(),
        }
    }

    /// Use a different store key
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    /// Currently selected pet.
    ///
    /// Missing or unparsable values fall back to [`default_pet`]; only
    /// storage failures are errors.
    pub async fn load(&self) -> Result<PetProfile> {
        let Some(raw) = self.store.get(&self.key).await? else {
            return Ok(default_pet().clone());
        };

        match serde_json::from_str::<PetProfile>(&raw) {
            Ok(profile) => Ok(profile),
            Err(e) => {
                warn!(
                    key = %self.key,
                    backend = self.store.backend(),
                    error = %e,
                    "Discarding malformed pet selection"
                );
                Ok(default_pet().clone())
            }
        }
    }

    /// Persist `profile` as the selection
    pub async fn save(&self, profile: &PetProfile) -> Result<()> {
        let json = serde_json::to_string(profile)?;
        self.store.set(&self.key, &json).await?;
        debug!(pet = %profile.id, "Saved pet selection");
        Ok(())
    }

    /// Select a catalog pet by id and persist it
    pub async fn select(&self, id: &str) -> Result<PetProfile> {
        let profile = find_pet(id)
            .ok_or_else(|| Error::UnknownPet(id.to_string()))?
            .clone();
        self.save(&profile).await?;
        Ok(profile)
    }

    /// Forget the selection. Returns whether one was stored.
    pub async fn clear(&self) -> Result<bool> {
        Ok(self.store.delete(&self.key).await?)
    }
}

impl std::fmt::Debug for PetSelection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PetSelection")
            .field("backend", &self.store.backend())
            .field("key", &self.key)
            .finish()
    }
}
