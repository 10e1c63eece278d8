//! CLI argument definitions using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Pitchside: match-weather data preparation and dashboard backend
#[derive(Parser)]
#[command(name = "pitchside")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Load, normalize, and join the two source tables
    Prepare {
        /// Path to the match table (CSV/TSV)
        #[arg(value_name = "MATCHES")]
        matches: PathBuf,

        /// Path to the weather table (CSV/TSV)
        #[arg(value_name = "WEATHER")]
        weather: PathBuf,

        /// Write the merged table to this path
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format
        #[arg(short, long, default_value = "csv")]
        format: OutputFormat,
    },

    /// Filter the merged table and print summary statistics
    Stats {
        /// Path to the match table (CSV/TSV)
        #[arg(value_name = "MATCHES")]
        matches: PathBuf,

        /// Path to the weather table (CSV/TSV)
        #[arg(value_name = "WEATHER")]
        weather: PathBuf,

        /// Keep only these seasons (repeatable)
        #[arg(long = "season", value_name = "SEASON")]
        seasons: Vec<String>,

        /// Keep only these cities (repeatable)
        #[arg(long = "city", value_name = "CITY")]
        cities: Vec<String>,

        /// Keep matches where either side is one of these teams (repeatable)
        #[arg(long = "team", value_name = "TEAM")]
        teams: Vec<String>,

        /// Lower temperature bound in °C (inclusive)
        #[arg(long)]
        temp_min: Option<f64>,

        /// Upper temperature bound in °C (inclusive)
        #[arg(long)]
        temp_max: Option<f64>,
    },

    /// Serve the merged table as a JSON API for the charting frontend
    Serve {
        /// Path to the match table (CSV/TSV)
        #[arg(value_name = "MATCHES")]
        matches: PathBuf,

        /// Path to the weather table (CSV/TSV)
        #[arg(value_name = "WEATHER")]
        weather: PathBuf,

        /// Port for the API server
        #[arg(short, long, default_value = "3141")]
        port: u16,
    },
}

#[derive(Clone, Debug, Default)]
pub enum OutputFormat {
    #[default]
    Csv,
    Tsv,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(OutputFormat::Csv),
            "tsv" => Ok(OutputFormat::Tsv),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown format: {}. Use csv, tsv, or json.", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Csv => write!(f, "csv"),
            OutputFormat::Tsv => write!(f, "tsv"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}
