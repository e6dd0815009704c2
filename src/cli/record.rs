//! CLI command: `petpal record`

use super::RecordEvent;
use crate::app::App;
use anyhow::Context;

/// Record one event and print the resulting day.
pub async fn run(app: &App, event: RecordEvent) -> anyhow::Result<()> {
    let ledger = &app.ledger;
    let record = match event {
        RecordEvent::Feeding => ledger.record_feeding().await,
        RecordEvent::Playing => ledger.record_playing().await,
        RecordEvent::Caring => ledger.record_caring().await,
        RecordEvent::Ignore => ledger.record_ignore().await,
        RecordEvent::Mood { label } => match ledger.record_mood_label(&label).await {
            Ok(Some(record)) => Ok(record),
            Ok(None) => {
                println!("  Unknown mood '{label}'; use happy, sad, overfed or neutral.");
                return Ok(());
            }
            Err(e) => Err(e),
        },
    }
    .context("Failed to update activity ledger")?;

    println!(
        "  {}: feeding {}, playing {}, caring {}, mood {}%",
        record.date, record.feeding, record.playing, record.caring, record.mood
    );
    Ok(())
}
