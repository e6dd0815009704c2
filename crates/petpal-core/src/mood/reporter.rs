//! Reporting seam between the mood session and activity accounting

use crate::error::Result;
use async_trait::async_trait;
use petpal_ledger::{ActivityLedger, Interaction, Mood};

/// Receives everything a mood session wants counted.
///
/// Failures are logged by the session and never stop it.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ActivityReporter: Send + Sync {
    /// A feed, play or care action was accepted
    async fn interaction(&self, interaction: Interaction) -> Result<()>;

    /// The displayed mood changed to `mood`
    async fn mood_changed(&self, mood: Mood) -> Result<()>;

    /// The pet crossed the ignore threshold
    async fn ignored(&self) -> Result<()>;
}

#[async_trait]
impl ActivityReporter for ActivityLedger {
    async fn interaction(&self, interaction: Interaction) -> Result<()> {
        self.record_interaction(interaction).await?;
        Ok(())
    }

    async fn mood_changed(&self, mood: Mood) -> Result<()> {
        self.record_mood_change(mood).await?;
        Ok(())
    }

    async fn ignored(&self) -> Result<()> {
        self.record_ignore().await?;
        Ok(())
    }
}

/// Reporter that drops everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopReporter;

#[async_trait]
impl ActivityReporter for NoopReporter {
    async fn interaction(&self, _interaction: Interaction) -> Result<()> {
        Ok(())
    }

    async fn mood_changed(&self, _mood: Mood) -> Result<()> {
        Ok(())
    }

    async fn ignored(&self) -> Result<()> {
        Ok(())
    }
}
