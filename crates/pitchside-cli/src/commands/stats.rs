//! Stats command - filter the merged table and print summary statistics.

use std::path::PathBuf;

use colored::Colorize;
use pitchside::summary::{
    mean_runs_by_bucket, mean_runs_by_weather_type, median_split,
};
use pitchside::{FilterSpec, Pitchside, Summary};

#[allow(clippy::too_many_arguments)]
pub fn run(
    matches: PathBuf,
    weather: PathBuf,
    seasons: Vec<String>,
    cities: Vec<String>,
    teams: Vec<String>,
    temp_min: Option<f64>,
    temp_max: Option<f64>,
) -> Result<(), Box<dyn std::error::Error>> {
    let pipeline = Pitchside::new(&matches, &weather);
    let prepared = pipeline.prepare()?;
    let records = &prepared.merged.records;

    // Start from the select-all state and narrow by whatever flags were
    // given, mirroring a dashboard sidebar.
    let mut spec = FilterSpec::select_all(records);
    if !seasons.is_empty() {
        spec.seasons = Some(seasons);
    }
    if !cities.is_empty() {
        spec.cities = cities;
    }
    if !teams.is_empty() {
        spec.teams = teams;
    }
    if let Some(lo) = temp_min {
        spec.temp_range.0 = lo;
    }
    if let Some(hi) = temp_max {
        spec.temp_range.1 = hi;
    }

    let rows = spec.apply(records);

    let Some(summary) = Summary::compute(&rows) else {
        // Not an error: the selection legitimately matches nothing.
        println!(
            "{} No data after applying filters. Try expanding your selections.",
            "Note:".yellow().bold()
        );
        return Ok(());
    };

    println!("{}", "Key match & weather overview".cyan().bold());
    println!("  Matches:          {}", summary.matches.to_string().white().bold());
    println!("  Avg total runs:   {:.1}", summary.avg_total_runs);
    println!("  Avg temp (°C):    {:.1}", summary.avg_temp_c);
    match summary.avg_humidity {
        Some(h) => println!("  Avg humidity (%): {:.1}", h),
        None => println!("  Avg humidity (%): N/A"),
    }
    println!();

    println!("{}", "Average total runs by temperature bucket".cyan().bold());
    for bucket in mean_runs_by_bucket(&rows) {
        println!(
            "  {:<16} {:>7.1}  ({} matches)",
            bucket.label,
            bucket.avg_total_runs,
            bucket.matches
        );
    }
    println!();

    let weather_types = mean_runs_by_weather_type(&rows);
    if weather_types.iter().any(|g| g.weather_type != "Unknown") {
        println!("{}", "Average total runs by weather type".cyan().bold());
        for group in &weather_types {
            println!(
                "  {:<16} {:>7.1}  ({} matches)",
                group.weather_type,
                group.avg_total_runs,
                group.matches
            );
        }
        println!();
    }

    if let Some(split) = median_split(&rows) {
        println!("{}", "Quick insights".cyan().bold());
        if let Some(hot) = split.avg_runs_hot_days {
            println!(
                "  Days at or above the median temp ({:.1} °C) averaged {:.1} runs",
                split.median_temp_c, hot
            );
        }
        if let Some(cool) = split.avg_runs_cool_days {
            println!("  Cooler days averaged {:.1} runs", cool);
        }
    }

    Ok(())
}
