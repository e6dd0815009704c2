//! CLI commands: `petpal stats` and `petpal today`

use crate::app::App;
use anyhow::Context;
use petpal_ledger::WeeklyStats;

/// Run the stats subcommand.
pub async fn run(app: &App, json: bool) -> anyhow::Result<()> {
    let stats = app
        .ledger
        .weekly_stats()
        .await
        .context("Failed to read activity ledger")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
    } else {
        print_table(&stats);
    }
    Ok(())
}

/// Run the today subcommand.
pub async fn today(app: &App) -> anyhow::Result<()> {
    let mood = app
        .ledger
        .today_mood()
        .await
        .context("Failed to read activity ledger")?;
    let pet = app.selection.load().await?;

    println!("  {} {} mood today: {}%", pet.emoji, pet.name, mood);
    println!("  {}", mood_bar(mood));
    Ok(())
}

fn print_table(stats: &WeeklyStats) {
    println!();
    println!("  Weekly Activity");
    println!("  {}", "-".repeat(56));
    println!(
        "  {:<5} {:<12} {:>8} {:>8} {:>8} {:>8}",
        "Day", "Date", "Feeding", "Playing", "Caring", "Mood"
    );
    println!("  {}", "-".repeat(56));

    for record in &stats.weekly_data {
        println!(
            "  {:<5} {:<12} {:>8} {:>8} {:>8} {:>7}%",
            record.weekday_label().unwrap_or("?"),
            record.date,
            record.feeding,
            record.playing,
            record.caring,
            record.mood
        );
    }

    println!("  {}", "-".repeat(56));
    println!(
        "  {:<18} {:>8} {:>8} {:>8} {:>7}%",
        "Total / average",
        stats.total_feedings,
        stats.total_playing,
        stats.total_caring,
        stats.avg_mood
    );

    println!();
    println!("  Reactions");
    let mut any = false;
    for (label, count) in stats.all_time_reactions.nonzero() {
        println!("  {:<10} {}", label, count);
        any = true;
    }
    if !any {
        println!("  (no reactions recorded this week)");
    }
    println!();
}

fn mood_bar(mood: u8) -> String {
    let filled = usize::from(mood) / 5;
    format!("[{}{}]", "#".repeat(filled), ".".repeat(20 - filled))
}
