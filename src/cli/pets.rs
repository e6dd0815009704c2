//! CLI commands: `petpal pets`, `petpal select` and `petpal pet`

use crate::app::App;
use petpal_core::{available_pets, Mood};

/// List the catalog, marking the current pet.
pub async fn list(app: &App) -> anyhow::Result<()> {
    let current = app.selection.load().await?;

    println!();
    for pet in available_pets() {
        let marker = if pet.id == current.id { "*" } else { " " };
        println!(
            "  {} {:<8} {} {:<8} {} {} {} {}",
            marker,
            pet.id,
            pet.emoji,
            pet.name,
            pet.emoji_for(Mood::Happy),
            pet.emoji_for(Mood::Sad),
            pet.emoji_for(Mood::Overfed),
            pet.emoji_for(Mood::Neutral)
        );
    }
    println!();
    Ok(())
}

/// Select and persist a pet.
pub async fn select(app: &App, id: &str) -> anyhow::Result<()> {
    let pet = app.selection.select(id).await?;
    println!("  {} {} is now your pet!", pet.emoji, pet.name);
    Ok(())
}

/// Show the current pet.
pub async fn show(app: &App) -> anyhow::Result<()> {
    let pet = app.selection.load().await?;
    println!("  {} {} ({})", pet.emoji, pet.name, pet.id);
    Ok(())
}
