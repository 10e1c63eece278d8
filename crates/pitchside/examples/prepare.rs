//! Example: prepare and summarize the match-weather join.
//!
//! Usage:
//!   cargo run --example prepare -- <matches_csv> <weather_csv>
//!
//! Example:
//!   cargo run --example prepare -- data/ipl_matches_sample.csv data/weather_sample.csv

use std::env;
use std::path::Path;

use pitchside::summary::{mean_runs_by_bucket, mean_runs_by_weather_type};
use pitchside::{FilterSpec, Pitchside, Summary};

fn main() -> pitchside::Result<()> {
    let args: Vec<String> = env::args().collect();

    if args.len() < 3 {
        eprintln!("Usage: cargo run --example prepare -- <matches_csv> <weather_csv>");
        eprintln!("\nExample:");
        eprintln!(
            "  cargo run --example prepare -- data/ipl_matches_sample.csv data/weather_sample.csv"
        );
        std::process::exit(1);
    }

    for arg in &args[1..3] {
        if !Path::new(arg).exists() {
            eprintln!("Error: File not found: {}", arg);
            std::process::exit(1);
        }
    }

    let separator = "=".repeat(80);
    println!("{}", separator);
    println!("Pitchside: {} + {}", args[1], args[2]);
    println!("{}", separator);
    println!();

    let pipeline = Pitchside::new(&args[1], &args[2]);
    let prepared = pipeline.prepare()?;

    println!("## Load Reports");
    for report in [&prepared.match_report, &prepared.weather_report] {
        println!(
            "  {:8} read={:<5} kept={:<5} dropped={}",
            report.table,
            report.rows_read,
            report.rows_kept,
            report.dropped()
        );
    }
    println!();

    println!("## Merged Table");
    println!("  Rows: {}", prepared.merged.len());
    println!("  Columns: {}", prepared.merged.columns.join(", "));
    println!();

    let spec = FilterSpec::select_all(&prepared.merged.records);
    let rows = spec.apply(&prepared.merged.records);

    match Summary::compute(&rows) {
        Some(summary) => {
            println!("## Summary");
            println!("  Matches: {}", summary.matches);
            println!("  Avg total runs: {:.1}", summary.avg_total_runs);
            println!("  Avg temp: {:.1} °C", summary.avg_temp_c);
            if let Some(h) = summary.avg_humidity {
                println!("  Avg humidity: {:.1}%", h);
            }
            println!();

            println!("## Avg Runs by Temperature Bucket");
            for bucket in mean_runs_by_bucket(&rows) {
                println!("  {:16} {:.1}", bucket.label, bucket.avg_total_runs);
            }
            println!();

            println!("## Avg Runs by Weather Type");
            for group in mean_runs_by_weather_type(&rows) {
                println!("  {:16} {:.1}", group.weather_type, group.avg_total_runs);
            }
        }
        None => println!("No rows joined."),
    }

    println!();
    println!("{}", separator);

    Ok(())
}
