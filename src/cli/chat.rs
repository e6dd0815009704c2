//! CLI command: `petpal chat`

use crate::app::App;
use petpal_core::PetChat;

/// Send one message and print the pet's reply.
pub async fn run(app: &App, message: &str) -> anyhow::Result<()> {
    let pet = app.selection.load().await?;
    let mut chat = PetChat::new();

    match chat.reply(message) {
        Some(reply) => println!("  {} {}", pet.emoji, reply.text),
        None => println!("  {} ...", pet.emoji),
    }
    Ok(())
}
