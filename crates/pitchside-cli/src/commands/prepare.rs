//! Prepare command - run the pipeline and optionally export the merged table.

use std::fs::File;
use std::path::PathBuf;

use colored::Colorize;
use pitchside::{export, LoadReport, Pitchside};

use crate::cli::OutputFormat;

pub fn run(
    matches: PathBuf,
    weather: PathBuf,
    output: Option<PathBuf>,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let pipeline = Pitchside::new(&matches, &weather);
    let prepared = pipeline.prepare()?;

    print_report(&prepared.match_report);
    print_report(&prepared.weather_report);
    println!();

    if prepared.merged.is_empty() {
        // A valid result, distinct from a load failure: nothing lined up
        // on (date, city).
        println!(
            "{} No rows joined. Check that dates and cities line up across the two files.",
            "Note:".yellow().bold()
        );
        return Ok(());
    }

    println!(
        "{} {} merged rows, {} columns",
        "Joined:".cyan().bold(),
        prepared.merged.len().to_string().white().bold(),
        prepared.merged.columns.len()
    );

    if let Some(path) = output {
        let file = File::create(&path)?;
        match format {
            OutputFormat::Csv => export::write_delimited(&prepared.merged, b',', file)?,
            OutputFormat::Tsv => export::write_delimited(&prepared.merged, b'\t', file)?,
            OutputFormat::Json => export::write_json(&prepared.merged, file)?,
        }
        println!(
            "Wrote merged table to {}",
            path.display().to_string().cyan()
        );
    }

    Ok(())
}

fn print_report(report: &LoadReport) {
    println!(
        "{} {} rows read, {} kept",
        format!("{}:", capitalize(&report.table)).cyan().bold(),
        report.rows_read.to_string().white(),
        report.rows_kept.to_string().green()
    );

    if report.dropped() > 0 {
        let mut parts = Vec::new();
        if report.dropped_unparseable_date > 0 {
            parts.push(format!("{} unparseable date", report.dropped_unparseable_date));
        }
        if report.dropped_missing_city > 0 {
            parts.push(format!("{} missing city", report.dropped_missing_city));
        }
        if report.dropped_bad_numeric > 0 {
            parts.push(format!("{} bad numeric", report.dropped_bad_numeric));
        }
        println!("  dropped: {}", parts.join(", ").yellow());
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
