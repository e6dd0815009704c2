//! CLI module for PetPal
//!
//! Provides the terminal front end:
//! - `stats` / `today`: weekly and daily activity summaries
//! - `pets` / `select` / `pet`: the pet catalog and the current pet
//! - `record`: log a single activity event
//! - `walk` / `chat`: pet activities
//! - `session`: interactive mood session

use crate::app;
use clap::{Parser, Subcommand};

mod chat;
mod pets;
mod record;
mod session;
mod stats;
mod walk;

/// PetPal virtual pet
#[derive(Parser, Debug)]
#[command(name = "petpal")]
#[command(about = "Virtual pet with a mood engine and activity ledger")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the last seven days of activity
    Stats {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show today's mood score
    Today,
    /// List the available pets
    Pets,
    /// Choose your pet
    Select {
        /// Pet id, e.g. `fox`
        id: String,
    },
    /// Show the current pet
    Pet,
    /// Record a single activity event
    Record {
        #[command(subcommand)]
        event: RecordEvent,
    },
    /// Take the pet for a walk
    Walk {
        /// Park, Beach, Forest, City, Mountains or Lake
        location: String,
    },
    /// Say something to the pet
    Chat {
        /// Message text
        #[arg(required = true, num_args = 1..)]
        message: Vec<String>,
    },
    /// Interactive session: feed, play and care for the pet
    Session,
}

#[derive(Subcommand, Debug, Clone)]
pub enum RecordEvent {
    /// Count a feeding
    Feeding,
    /// Count a play session
    Playing,
    /// Count a care session
    Caring,
    /// Count the pet being ignored
    Ignore,
    /// Count a mood change
    Mood {
        /// happy, sad, overfed or neutral
        label: String,
    },
}

/// Run the CLI command
pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let Some(command) = cli.command else {
        let mut cmd = <Cli as clap::CommandFactory>::command();
        cmd.print_help()?;
        println!();
        return Ok(());
    };

    let config = app::load_config()?;
    let app = app::init(config).await?;

    match command {
        Commands::Stats { json } => stats::run(&app, json).await,
        Commands::Today => stats::today(&app).await,
        Commands::Pets => pets::list(&app).await,
        Commands::Select { id } => pets::select(&app, &id).await,
        Commands::Pet => pets::show(&app).await,
        Commands::Record { event } => record::run(&app, event).await,
        Commands::Walk { location } => walk::run(&app, &location).await,
        Commands::Chat { message } => chat::run(&app, &message.join(" ")).await,
        Commands::Session => session::run(&app).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_record_mood() {
        let cli = Cli::try_parse_from(["petpal", "record", "mood", "happy"]).unwrap();
        match cli.command {
            Some(Commands::Record {
                event: RecordEvent::Mood { label },
            }) => assert_eq!(label, "happy"),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_chat_joins_words() {
        let cli = Cli::try_parse_from(["petpal", "chat", "hello", "there"]).unwrap();
        match cli.command {
            Some(Commands::Chat { message }) => assert_eq!(message.join(" "), "hello there"),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_stats_json() {
        let cli = Cli::try_parse_from(["petpal", "stats", "--json"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Stats { json: true })));
    }

    #[test]
    fn test_chat_requires_message() {
        assert!(Cli::try_parse_from(["petpal", "chat"]).is_err());
    }
}
