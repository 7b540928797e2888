//! Review command - open web UI for interactive labeling.

use std::path::PathBuf;

use briefmark::{ReviewConfig, SessionSlot};
use colored::Colorize;
use tracing::info;

use crate::server::{app, state::AppState};

pub fn run(
    file: Option<PathBuf>,
    port: u16,
    no_open: bool,
    config: ReviewConfig,
    fresh: bool,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut slot = SessionSlot::new(config.reload_policy);

    if let Some(file) = &file {
        let (session, resumed) = super::open_session(file, &config, fresh)?;
        if resumed {
            println!(
                "{} Resuming at record {} of {} ({} marked)",
                "Note:".yellow(),
                session.cursor() + 1,
                session.len(),
                session.labeled_count()
            );
        } else if verbose {
            println!("Loaded {} records from {}", session.len(), file.display());
        }
        slot.restore(session);
    }

    let state = AppState::new(slot, config.clone());

    let url = format!("http://localhost:{}", port);
    println!();
    println!(
        "{} {}",
        "Starting review server at".cyan().bold(),
        url.white().bold()
    );
    println!();
    match &file {
        Some(file) => println!("  File: {}", file.display()),
        None => println!("  File: (upload one in the browser)"),
    }
    println!("  Output: {}", config.output_dir.display());
    println!("  Reload: {}", config.reload_policy);
    println!();
    println!("Press {} to stop the server", "Ctrl+C".yellow().bold());
    println!();

    if !no_open {
        if let Err(e) = open::that(&url) {
            eprintln!("{} Could not open browser: {}", "Warning:".yellow(), e);
        }
    }

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        app::run_server(state.clone(), port).await?;

        println!("{}", "Shutting down...".yellow());
        if let Some(path) = state.save().await? {
            info!(path = %path.display(), "saved session on shutdown");
        }
        Ok::<(), Box<dyn std::error::Error>>(())
    })?;

    Ok(())
}
