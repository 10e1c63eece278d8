//! Pitchside CLI - match-weather data preparation and dashboard backend.

mod cli;
mod commands;
mod server;

use clap::Parser;
use cli::{Cli, Commands};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Prepare {
            matches,
            weather,
            output,
            format,
        } => commands::prepare::run(matches, weather, output, format),

        Commands::Stats {
            matches,
            weather,
            seasons,
            cities,
            teams,
            temp_min,
            temp_max,
        } => commands::stats::run(matches, weather, seasons, cities, teams, temp_min, temp_max),

        Commands::Serve {
            matches,
            weather,
            port,
        } => commands::serve::run(matches, weather, port),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Diagnostics go to stderr so command output stays pipeable. RUST_LOG
/// overrides; --verbose raises the default to debug.
fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
