//! Inner join of the match and weather tables on (date, city).

use std::collections::{HashMap, HashSet};

use chrono::NaiveDate;
use indexmap::IndexMap;

use crate::load::{MatchTable, WeatherTable};
use crate::schema::{MatchRecord, MergedRecord, TempBucket, WeatherRecord};

/// The composite join key.
const JOIN_KEYS: &[&str] = &["date", "city"];

/// The joined table: merged records plus the flattened column layout.
///
/// Zero rows is a valid state, not an error; the consuming layer decides
/// how to present it.
#[derive(Debug, Clone)]
pub struct MergedTable {
    pub records: Vec<MergedRecord>,
    /// Column names in output order: match columns, weather columns minus
    /// the join keys, then `date_str` and `temp_bucket`. Names colliding
    /// across the sides carry a `_match` / `_weather` suffix.
    pub columns: Vec<String>,
}

impl MergedTable {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Inner-join the two tables on (date, city).
///
/// Exact equality on both key fields. City is case-sensitive: keys were
/// trimmed at load, deliberately not case-folded, so two spellings
/// differing only in case are distinct cities and silently produce no
/// match. Output order is driven by match-table row order; a match row
/// with several same-key weather rows expands in weather-file order, so
/// the join is deterministic and idempotent.
pub fn join_match_weather(matches: &MatchTable, weather: &WeatherTable) -> MergedTable {
    let collisions = colliding_columns(&matches.columns, &weather.columns);

    let mut by_key: HashMap<(NaiveDate, &str), Vec<&WeatherRecord>> = HashMap::new();
    for w in &weather.records {
        by_key.entry((w.date, w.city.as_str())).or_default().push(w);
    }

    let mut records = Vec::new();
    for m in &matches.records {
        let Some(observations) = by_key.get(&(m.date, m.city.as_str())) else {
            continue;
        };
        for w in observations {
            records.push(merge_row(m, w, &collisions));
        }
    }

    tracing::debug!(
        match_rows = matches.records.len(),
        weather_rows = weather.records.len(),
        merged_rows = records.len(),
        "join complete"
    );

    MergedTable {
        records,
        columns: column_layout(&matches.columns, &weather.columns, &collisions),
    }
}

fn merge_row(
    m: &MatchRecord,
    w: &WeatherRecord,
    collisions: &HashSet<String>,
) -> MergedRecord {
    let mut extra = IndexMap::new();
    for (name, value) in &m.extra {
        extra.insert(suffixed(name, "_match", collisions), value.clone());
    }
    for (name, value) in &w.extra {
        extra.insert(suffixed(name, "_weather", collisions), value.clone());
    }

    MergedRecord {
        date: m.date,
        city: m.city.clone(),
        date_str: m.date.format("%Y-%m-%d").to_string(),
        total_runs: m.total_runs,
        season: m.season.clone(),
        team1: m.team1.clone(),
        team2: m.team2.clone(),
        temp_c: w.temp_c,
        humidity: w.humidity,
        weather_type: w.weather_type.clone(),
        temp_bucket: TempBucket::from_temp_c(w.temp_c),
        extra,
    }
}

/// Non-key column names present on both sides.
fn colliding_columns(match_cols: &[String], weather_cols: &[String]) -> HashSet<String> {
    match_cols
        .iter()
        .filter(|c| !JOIN_KEYS.contains(&c.as_str()))
        .filter(|c| weather_cols.contains(c))
        .cloned()
        .collect()
}

fn suffixed(name: &str, suffix: &str, collisions: &HashSet<String>) -> String {
    if collisions.contains(name) {
        format!("{name}{suffix}")
    } else {
        name.to_string()
    }
}

fn column_layout(
    match_cols: &[String],
    weather_cols: &[String],
    collisions: &HashSet<String>,
) -> Vec<String> {
    let mut columns = Vec::new();
    for c in match_cols {
        columns.push(suffixed(c, "_match", collisions));
    }
    for c in weather_cols {
        if JOIN_KEYS.contains(&c.as_str()) {
            continue;
        }
        columns.push(suffixed(c, "_weather", collisions));
    }
    columns.push("date_str".to_string());
    columns.push("temp_bucket".to_string());
    columns
}
