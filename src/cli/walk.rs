//! CLI command: `petpal walk`

use crate::app::App;
use petpal_core::{Error, Walk, WalkLocation};
use std::io::Write;
use tokio_util::sync::CancellationToken;

/// Walk to `location`, drawing progress until arrival or Ctrl-C.
pub async fn run(app: &App, location: &str) -> anyhow::Result<()> {
    let location: WalkLocation = location.parse()?;
    let pet = app.selection.load().await?;

    let walk = Walk::new(location, app.config.walk.clone()).with_event_bus(app.events.clone());
    let mut progress = walk.progress();

    let cancel = CancellationToken::new();
    let ctrl_c = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            ctrl_c.cancel();
        }
    });

    let drawer = tokio::spawn(async move {
        while progress.changed().await.is_ok() {
            let pct = *progress.borrow_and_update();
            print!("\r  {} walking to the {} [{:>3}%]", pet.emoji, location, pct);
            let _ = std::io::stdout().flush();
        }
    });

    let result = walk.run(cancel).await;
    // The walk owned the progress sender; the drawer ends once it is gone.
    let _ = drawer.await;
    println!();

    match result {
        Ok(summary) => {
            println!("  {}", summary.message);
            Ok(())
        }
        Err(Error::WalkCancelled { progress }) => {
            println!("  Walk cut short at {progress}%.");
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}
