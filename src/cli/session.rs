//! CLI command: `petpal session`
//!
//! Reads `feed`, `play`, `care`, `status` and `quit` from stdin and redraws
//! the pet whenever its mood changes.

use crate::app::App;
use anyhow::Context;
use petpal_core::{Error, MoodSession, MoodSnapshot, PetAction, PetProfile};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;

enum Input {
    Act(PetAction),
    Status,
    Help,
    Quit,
    Unknown,
}

fn parse(line: &str) -> Option<Input> {
    let word = line.trim().to_lowercase();
    let input = match word.as_str() {
        "" => return None,
        "feed" | "f" => Input::Act(PetAction::Feed),
        "play" | "p" => Input::Act(PetAction::Play),
        "care" | "c" => Input::Act(PetAction::Care),
        "status" | "s" => Input::Status,
        "help" | "?" => Input::Help,
        "quit" | "exit" | "q" => Input::Quit,
        _ => Input::Unknown,
    };
    Some(input)
}

fn render(pet: &PetProfile, snapshot: &MoodSnapshot) -> String {
    format!(
        "  {} {} is {} (fed {}/3)",
        pet.emoji_for(snapshot.mood),
        pet.name,
        snapshot.mood,
        snapshot.feed_count
    )
}

fn print_help() {
    println!("  Commands: feed, play, care, status, help, quit");
}

/// Run the interactive session until `quit`, end of input or Ctrl-C.
pub async fn run(app: &App) -> anyhow::Result<()> {
    let pet = app.selection.load().await?;
    let session = MoodSession::builder(app.config.mood.clone())
        .reporter(Arc::new(app.ledger.clone()))
        .event_bus(app.events.clone())
        .spawn()
        .context("Failed to start mood session")?;
    info!(session_id = %session.id(), pet = %pet.id, "Interactive session started");

    let mut moods = session.subscribe();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    println!("{}", render(&pet, &session.snapshot()));
    print_help();

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.context("Failed to read stdin")? else {
                    break;
                };
                match parse(&line) {
                    None => {}
                    Some(Input::Act(action)) => match session.act(action).await {
                        Ok(_) => {}
                        Err(Error::Overfed) => {
                            println!("  {} is too full to eat right now!", pet.name);
                        }
                        Err(e) => return Err(e.into()),
                    },
                    Some(Input::Status) => println!("{}", render(&pet, &session.snapshot())),
                    Some(Input::Help) => print_help(),
                    Some(Input::Quit) => break,
                    Some(Input::Unknown) => {
                        println!("  Unknown command '{}'", line.trim());
                        print_help();
                    }
                }
            }

            changed = moods.changed() => {
                if changed.is_err() {
                    break;
                }
                let snapshot = *moods.borrow_and_update();
                println!("{}", render(&pet, &snapshot));
            }

            _ = tokio::signal::ctrl_c() => break,
        }
    }

    session.shutdown().await;
    let mood = app.ledger.today_mood().await?;
    println!("  Bye! Today's mood score: {mood}%");
    Ok(())
}
