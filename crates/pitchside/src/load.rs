//! Table loaders: from a raw [`DataTable`] to typed, validated records.
//!
//! Each loader normalizes headers (trim + lowercase), validates the
//! required-column set, normalizes the join keys, and applies
//! source-specific defaults. Rows that cannot satisfy the date/city/numeric
//! invariants are dropped and counted, never kept with sentinel values.

use indexmap::IndexMap;

use crate::date::parse_date;
use crate::error::Result;
use crate::input::DataTable;
use crate::schema::{
    require_columns, MatchRecord, WeatherRecord, MATCH_REQUIRED, WEATHER_REQUIRED,
};

/// Per-table account of what the loader kept and dropped.
///
/// Row drops are a data-quality policy, not errors; the counts exist so
/// the caller can surface them for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct LoadReport {
    pub table: String,
    pub rows_read: usize,
    pub rows_kept: usize,
    pub dropped_unparseable_date: usize,
    pub dropped_missing_city: usize,
    pub dropped_bad_numeric: usize,
}

impl LoadReport {
    fn new(table: &str, rows_read: usize) -> Self {
        Self {
            table: table.to_string(),
            rows_read,
            rows_kept: 0,
            dropped_unparseable_date: 0,
            dropped_missing_city: 0,
            dropped_bad_numeric: 0,
        }
    }

    /// Total rows dropped for any reason.
    pub fn dropped(&self) -> usize {
        self.dropped_unparseable_date + self.dropped_missing_city + self.dropped_bad_numeric
    }

    fn emit(&self) {
        tracing::debug!(
            table = %self.table,
            rows_read = self.rows_read,
            rows_kept = self.rows_kept,
            dropped_unparseable_date = self.dropped_unparseable_date,
            dropped_missing_city = self.dropped_missing_city,
            dropped_bad_numeric = self.dropped_bad_numeric,
            "table loaded"
        );
    }
}

/// The normalized match table.
#[derive(Debug, Clone)]
pub struct MatchTable {
    pub records: Vec<MatchRecord>,
    /// Normalized column names in source order.
    pub columns: Vec<String>,
    pub report: LoadReport,
}

/// The normalized weather table.
///
/// `columns` always ends with `humidity` and `weather_type`: when the
/// source file lacks them they are appended with their defaults.
#[derive(Debug, Clone)]
pub struct WeatherTable {
    pub records: Vec<WeatherRecord>,
    pub columns: Vec<String>,
    pub report: LoadReport,
}

/// Columns consumed into named [`MatchRecord`] fields.
const MATCH_NAMED: &[&str] = &["date", "city", "total_runs", "season", "team1", "team2"];

/// Columns consumed into named [`WeatherRecord`] fields.
const WEATHER_NAMED: &[&str] = &["date", "city", "temp_c", "humidity", "weather_type"];

/// Load and normalize the match table.
pub fn load_match_table(table: &DataTable) -> Result<MatchTable> {
    let headers = normalized_headers(table);
    require_columns("match", &headers, MATCH_REQUIRED)?;

    let date_idx = index_of(&headers, "date").expect("validated");
    let city_idx = index_of(&headers, "city").expect("validated");
    let runs_idx = index_of(&headers, "total_runs").expect("validated");
    let season_idx = index_of(&headers, "season");
    let team1_idx = index_of(&headers, "team1");
    let team2_idx = index_of(&headers, "team2");

    let extra_indices = passthrough_indices(&headers, MATCH_NAMED);

    let mut report = LoadReport::new("match", table.row_count());
    let mut records = Vec::with_capacity(table.row_count());

    for row in &table.rows {
        let Some(date) = parse_date(&row[date_idx]) else {
            report.dropped_unparseable_date += 1;
            continue;
        };

        let city = row[city_idx].trim();
        if DataTable::is_null_value(city) {
            report.dropped_missing_city += 1;
            continue;
        }

        let Some(total_runs) = parse_numeric(&row[runs_idx]) else {
            report.dropped_bad_numeric += 1;
            continue;
        };

        records.push(MatchRecord {
            date,
            city: city.to_string(),
            total_runs,
            season: optional_string(row, season_idx),
            team1: optional_string(row, team1_idx),
            team2: optional_string(row, team2_idx),
            extra: collect_extras(row, &extra_indices, &headers),
        });
    }

    report.rows_kept = records.len();
    report.emit();

    Ok(MatchTable {
        records,
        columns: headers,
        report,
    })
}

/// Load and normalize the weather table.
pub fn load_weather_table(table: &DataTable) -> Result<WeatherTable> {
    let mut headers = normalized_headers(table);
    require_columns("weather", &headers, WEATHER_REQUIRED)?;

    let date_idx = index_of(&headers, "date").expect("validated");
    let city_idx = index_of(&headers, "city").expect("validated");
    let temp_idx = index_of(&headers, "temp_c").expect("validated");
    let humidity_idx = index_of(&headers, "humidity");
    let weather_type_idx = index_of(&headers, "weather_type");

    let extra_indices = passthrough_indices(&headers, WEATHER_NAMED);

    let mut report = LoadReport::new("weather", table.row_count());
    let mut records = Vec::with_capacity(table.row_count());

    for row in &table.rows {
        let Some(date) = parse_date(&row[date_idx]) else {
            report.dropped_unparseable_date += 1;
            continue;
        };

        let city = row[city_idx].trim();
        if DataTable::is_null_value(city) {
            report.dropped_missing_city += 1;
            continue;
        }

        let Some(temp_c) = parse_numeric(&row[temp_idx]) else {
            report.dropped_bad_numeric += 1;
            continue;
        };

        let humidity = humidity_idx.and_then(|i| parse_numeric(&row[i]));
        let weather_type = weather_type_idx
            .map(|i| row[i].trim())
            .filter(|v| !DataTable::is_null_value(v))
            .unwrap_or("Unknown")
            .to_string();

        records.push(WeatherRecord {
            date,
            city: city.to_string(),
            temp_c,
            humidity,
            weather_type,
            extra: collect_extras(row, &extra_indices, &headers),
        });
    }

    // Defaulted columns appear in the table even when the file lacks them.
    if humidity_idx.is_none() {
        headers.push("humidity".to_string());
    }
    if weather_type_idx.is_none() {
        headers.push("weather_type".to_string());
    }

    report.rows_kept = records.len();
    report.emit();

    Ok(WeatherTable {
        records,
        columns: headers,
        report,
    })
}

/// Trim and lowercase every header.
fn normalized_headers(table: &DataTable) -> Vec<String> {
    table
        .headers
        .iter()
        .map(|h| h.trim().to_lowercase())
        .collect()
}

fn index_of(headers: &[String], name: &str) -> Option<usize> {
    headers.iter().position(|h| h == name)
}

/// Indices of columns that pass through untyped, in source order.
fn passthrough_indices(headers: &[String], named: &[&str]) -> Vec<usize> {
    headers
        .iter()
        .enumerate()
        .filter(|(_, h)| !named.contains(&h.as_str()))
        .map(|(i, _)| i)
        .collect()
}

fn collect_extras(
    row: &[String],
    indices: &[usize],
    headers: &[String],
) -> IndexMap<String, String> {
    indices
        .iter()
        .map(|&i| (headers[i].clone(), row[i].clone()))
        .collect()
}

fn optional_string(row: &[String], idx: Option<usize>) -> Option<String> {
    let value = row[idx?].trim();
    if DataTable::is_null_value(value) {
        None
    } else {
        Some(value.to_string())
    }
}

fn parse_numeric(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    if DataTable::is_null_value(trimmed) {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Parser;
    use chrono::NaiveDate;

    fn table(data: &str) -> DataTable {
        Parser::new().parse_bytes(data.as_bytes(), b',').unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn match_loader_normalizes_and_keeps_extras() {
        let t = table(
            " Date ,CITY,Season,team1,team2,total_runs,Venue\n\
             2021-04-10, Mumbai ,2021,MI,CSK,180,Wankhede Stadium\n",
        );
        let loaded = load_match_table(&t).unwrap();

        assert_eq!(loaded.records.len(), 1);
        let rec = &loaded.records[0];
        assert_eq!(rec.date, date(2021, 4, 10));
        assert_eq!(rec.city, "Mumbai");
        assert_eq!(rec.total_runs, 180.0);
        assert_eq!(rec.season.as_deref(), Some("2021"));
        assert_eq!(rec.team1.as_deref(), Some("MI"));
        assert_eq!(rec.extra.get("venue").map(String::as_str), Some("Wankhede Stadium"));
        assert_eq!(
            loaded.columns,
            vec!["date", "city", "season", "team1", "team2", "total_runs", "venue"]
        );
    }

    #[test]
    fn match_loader_rejects_missing_columns() {
        let t = table("date,city\n2021-04-10,Mumbai\n");
        let err = load_match_table(&t).unwrap_err();
        assert!(err.to_string().contains("total_runs"));
    }

    #[test]
    fn rows_with_bad_dates_are_dropped_and_counted() {
        let t = table(
            "date,city,total_runs\n\
             2021-04-10,Mumbai,180\n\
             not-a-date,Delhi,165\n\
             ,Chennai,150\n",
        );
        let loaded = load_match_table(&t).unwrap();

        assert_eq!(loaded.records.len(), 1);
        assert_eq!(loaded.report.rows_read, 3);
        assert_eq!(loaded.report.dropped_unparseable_date, 2);
        assert_eq!(
            loaded.report.rows_kept + loaded.report.dropped(),
            loaded.report.rows_read
        );
    }

    #[test]
    fn rows_with_null_city_or_bad_runs_are_dropped() {
        let t = table(
            "date,city,total_runs\n\
             2021-04-10,Mumbai,180\n\
             2021-04-11,NA,170\n\
             2021-04-12,Delhi,abc\n",
        );
        let loaded = load_match_table(&t).unwrap();

        assert_eq!(loaded.records.len(), 1);
        assert_eq!(loaded.report.dropped_missing_city, 1);
        assert_eq!(loaded.report.dropped_bad_numeric, 1);
    }

    #[test]
    fn weather_loader_applies_defaults_for_absent_columns() {
        let t = table("date,city,temp_c\n2021-04-10,Mumbai,32\n");
        let loaded = load_weather_table(&t).unwrap();

        let rec = &loaded.records[0];
        assert_eq!(rec.humidity, None);
        assert_eq!(rec.weather_type, "Unknown");
        assert_eq!(
            loaded.columns,
            vec!["date", "city", "temp_c", "humidity", "weather_type"]
        );
    }

    #[test]
    fn weather_loader_defaults_blank_values() {
        let t = table(
            "date,city,temp_c,humidity,weather_type\n\
             2021-04-10,Mumbai,32,60,Sunny\n\
             2021-04-11,Delhi,28,,\n",
        );
        let loaded = load_weather_table(&t).unwrap();

        assert_eq!(loaded.records[0].humidity, Some(60.0));
        assert_eq!(loaded.records[0].weather_type, "Sunny");
        assert_eq!(loaded.records[1].humidity, None);
        assert_eq!(loaded.records[1].weather_type, "Unknown");
    }

    #[test]
    fn weather_loader_rejects_missing_temp() {
        let t = table("date,city,humidity\n2021-04-10,Mumbai,60\n");
        let err = load_weather_table(&t).unwrap_err();
        assert!(err.to_string().contains("temp_c"));
    }

    #[test]
    fn mixed_date_formats_normalize_to_the_same_table() {
        let t = table(
            "date,city,total_runs\n\
             2021-05-03,Mumbai,180\n\
             3rd May 2021,Delhi,170\n\
             03/05/2021,Chennai,160\n",
        );
        let loaded = load_match_table(&t).unwrap();

        assert_eq!(loaded.records.len(), 3);
        for rec in &loaded.records {
            assert_eq!(rec.date, date(2021, 5, 3));
        }
    }
}
