//! Serve command - JSON API backend for the charting frontend.

use std::path::PathBuf;

use colored::Colorize;
use pitchside::Pitchside;

use crate::server::{app, state::AppState};

pub fn run(
    matches: PathBuf,
    weather: PathBuf,
    port: u16,
) -> Result<(), Box<dyn std::error::Error>> {
    let pipeline = Pitchside::new(&matches, &weather);
    let state = AppState::new(pipeline);

    let url = format!("http://localhost:{}", port);
    println!();
    println!(
        "{} {}",
        "Starting API server at".cyan().bold(),
        url.white().bold()
    );
    println!();
    println!("  Matches: {}", matches.display());
    println!("  Weather: {}", weather.display());
    println!();
    println!("Press {} to stop the server", "Ctrl+C".yellow().bold());
    println!();

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        // Prime the cache so schema problems surface before we listen.
        if let Err(e) = state.prepared().await {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }

        tokio::spawn(async move {
            tokio::signal::ctrl_c().await.ok();
            println!();
            println!("{}", "Shutting down...".yellow());
            std::process::exit(0);
        });

        if let Err(e) = app::run_server(state, port).await {
            eprintln!("Server error: {}", e);
        }
    });

    Ok(())
}
