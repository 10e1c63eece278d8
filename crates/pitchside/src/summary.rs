//! Aggregations over the filtered table, for the presentation layer.
//!
//! Every function here guards the empty table: aggregates over zero rows
//! are represented as `None` or an empty vector, never computed. The
//! consuming layer turns that into a "no data" notice.

use chrono::NaiveDate;
use serde::Serialize;

use crate::schema::{MergedRecord, TempBucket};

/// Headline metrics over the filtered table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub matches: usize,
    pub avg_total_runs: f64,
    pub avg_temp_c: f64,
    /// Mean over rows that carry a humidity value; `None` when none do.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avg_humidity: Option<f64>,
}

impl Summary {
    /// Compute the headline metrics, or `None` for an empty table.
    pub fn compute(records: &[MergedRecord]) -> Option<Self> {
        if records.is_empty() {
            return None;
        }

        let humidity: Vec<f64> = records.iter().filter_map(|r| r.humidity).collect();

        Some(Self {
            matches: records.len(),
            avg_total_runs: mean(records.iter().map(|r| r.total_runs)).unwrap_or(0.0),
            avg_temp_c: mean(records.iter().map(|r| r.temp_c)).unwrap_or(0.0),
            avg_humidity: mean(humidity.iter().copied()),
        })
    }
}

/// Mean total runs for one temperature bucket.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BucketMean {
    pub bucket: TempBucket,
    pub label: String,
    pub avg_total_runs: f64,
    pub matches: usize,
}

/// Mean total runs per temperature bucket, in ascending bucket order.
/// Buckets with no rows are omitted.
pub fn mean_runs_by_bucket(records: &[MergedRecord]) -> Vec<BucketMean> {
    TempBucket::all()
        .into_iter()
        .filter_map(|bucket| {
            let runs: Vec<f64> = records
                .iter()
                .filter(|r| r.temp_bucket == bucket)
                .map(|r| r.total_runs)
                .collect();
            mean(runs.iter().copied()).map(|avg| BucketMean {
                bucket,
                label: bucket.label().to_string(),
                avg_total_runs: avg,
                matches: runs.len(),
            })
        })
        .collect()
}

/// Mean total runs for one weather type.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherTypeMean {
    pub weather_type: String,
    pub avg_total_runs: f64,
    pub matches: usize,
}

/// Mean total runs per weather type, sorted by mean descending.
pub fn mean_runs_by_weather_type(records: &[MergedRecord]) -> Vec<WeatherTypeMean> {
    let mut groups: Vec<WeatherTypeMean> = Vec::new();

    for record in records {
        match groups
            .iter_mut()
            .find(|g| g.weather_type == record.weather_type)
        {
            Some(group) => {
                // Accumulates the sum; divided into a mean below.
                group.avg_total_runs += record.total_runs;
                group.matches += 1;
            }
            None => groups.push(WeatherTypeMean {
                weather_type: record.weather_type.clone(),
                avg_total_runs: record.total_runs,
                matches: 1,
            }),
        }
    }

    for group in &mut groups {
        group.avg_total_runs /= group.matches as f64;
    }

    groups.sort_by(|a, b| {
        b.avg_total_runs
            .partial_cmp(&a.avg_total_runs)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    groups
}

/// One point of the date-ordered series behind the per-city line charts.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesPoint {
    pub date: NaiveDate,
    pub date_str: String,
    pub city: String,
    pub total_runs: f64,
    pub temp_c: f64,
}

/// The filtered rows sorted by date (stable, so same-day rows keep their
/// join order), projected to the fields the line charts use.
pub fn time_series(records: &[MergedRecord]) -> Vec<SeriesPoint> {
    let mut points: Vec<SeriesPoint> = records
        .iter()
        .map(|r| SeriesPoint {
            date: r.date,
            date_str: r.date_str.clone(),
            city: r.city.clone(),
            total_runs: r.total_runs,
            temp_c: r.temp_c,
        })
        .collect();
    points.sort_by_key(|p| p.date);
    points
}

/// One point of the temp-vs-runs scatter, with hover context.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterPoint {
    pub temp_c: f64,
    pub total_runs: f64,
    pub city: String,
    pub date_str: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub venue: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team1: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team2: Option<String>,
}

/// Scatter projection of the filtered rows. The trend line over these
/// points is the charting frontend's job, not the core's.
pub fn scatter_points(records: &[MergedRecord]) -> Vec<ScatterPoint> {
    records
        .iter()
        .map(|r| ScatterPoint {
            temp_c: r.temp_c,
            total_runs: r.total_runs,
            city: r.city.clone(),
            date_str: r.date_str.clone(),
            venue: r.extra.get("venue").cloned(),
            team1: r.team1.clone(),
            team2: r.team2.clone(),
        })
        .collect()
}

/// Mean runs on days at/above the median temperature vs below it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MedianSplit {
    pub median_temp_c: f64,
    /// Mean total runs on days with temp_c >= median.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avg_runs_hot_days: Option<f64>,
    /// Mean total runs on days with temp_c < median. `None` when every
    /// day sits at or above the median (e.g. a single-row table).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avg_runs_cool_days: Option<f64>,
}

/// Split the table at the median temperature, or `None` when empty.
pub fn median_split(records: &[MergedRecord]) -> Option<MedianSplit> {
    let median = median(records.iter().map(|r| r.temp_c))?;

    let hot = records.iter().filter(|r| r.temp_c >= median);
    let cool = records.iter().filter(|r| r.temp_c < median);

    Some(MedianSplit {
        median_temp_c: median,
        avg_runs_hot_days: mean(hot.map(|r| r.total_runs)),
        avg_runs_cool_days: mean(cool.map(|r| r.total_runs)),
    })
}

fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let mut sum = 0.0;
    let mut count = 0usize;
    for v in values {
        sum += v;
        count += 1;
    }
    if count == 0 {
        None
    } else {
        Some(sum / count as f64)
    }
}

fn median(values: impl Iterator<Item = f64>) -> Option<f64> {
    let mut sorted: Vec<f64> = values.collect();
    if sorted.is_empty() {
        return None;
    }
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 1 {
        Some(sorted[mid])
    } else {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indexmap::IndexMap;

    fn record(city: &str, date_day: u32, total_runs: f64, temp_c: f64, humidity: Option<f64>, weather_type: &str) -> MergedRecord {
        let date = NaiveDate::from_ymd_opt(2021, 4, date_day).unwrap();
        MergedRecord {
            date,
            city: city.to_string(),
            date_str: date.format("%Y-%m-%d").to_string(),
            total_runs,
            season: None,
            team1: None,
            team2: None,
            temp_c,
            humidity,
            weather_type: weather_type.to_string(),
            temp_bucket: TempBucket::from_temp_c(temp_c),
            extra: IndexMap::new(),
        }
    }

    #[test]
    fn summary_of_empty_table_is_none() {
        assert_eq!(Summary::compute(&[]), None);
    }

    #[test]
    fn summary_means() {
        let records = vec![
            record("Mumbai", 10, 180.0, 32.0, Some(60.0), "Sunny"),
            record("Delhi", 11, 160.0, 28.0, None, "Cloudy"),
        ];
        let summary = Summary::compute(&records).unwrap();
        assert_eq!(summary.matches, 2);
        assert_eq!(summary.avg_total_runs, 170.0);
        assert_eq!(summary.avg_temp_c, 30.0);
        // Humidity averages over the rows that have one.
        assert_eq!(summary.avg_humidity, Some(60.0));
    }

    #[test]
    fn summary_without_any_humidity() {
        let records = vec![record("Mumbai", 10, 180.0, 32.0, None, "Sunny")];
        let summary = Summary::compute(&records).unwrap();
        assert_eq!(summary.avg_humidity, None);
    }

    #[test]
    fn bucket_means_come_in_bucket_order_and_skip_empty_buckets() {
        let records = vec![
            record("Chennai", 12, 150.0, 36.0, None, "Sunny"),
            record("Mumbai", 10, 180.0, 24.0, None, "Sunny"),
            record("Delhi", 11, 160.0, 22.0, None, "Cloudy"),
        ];
        let buckets = mean_runs_by_bucket(&records);
        assert_eq!(buckets.len(), 2);
        assert_eq!(buckets[0].bucket, TempBucket::Cool);
        assert_eq!(buckets[0].avg_total_runs, 170.0);
        assert_eq!(buckets[0].matches, 2);
        assert_eq!(buckets[1].bucket, TempBucket::VeryHot);
        assert_eq!(buckets[1].matches, 1);
    }

    #[test]
    fn weather_type_means_sort_descending() {
        let records = vec![
            record("Mumbai", 10, 120.0, 30.0, None, "Cloudy"),
            record("Delhi", 11, 200.0, 31.0, None, "Sunny"),
            record("Chennai", 12, 140.0, 29.0, None, "Cloudy"),
        ];
        let groups = mean_runs_by_weather_type(&records);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].weather_type, "Sunny");
        assert_eq!(groups[0].avg_total_runs, 200.0);
        assert_eq!(groups[1].weather_type, "Cloudy");
        assert_eq!(groups[1].avg_total_runs, 130.0);
    }

    #[test]
    fn time_series_sorts_by_date_stably() {
        let records = vec![
            record("Mumbai", 12, 180.0, 32.0, None, "Sunny"),
            record("Delhi", 10, 160.0, 28.0, None, "Cloudy"),
            record("Chennai", 10, 150.0, 30.0, None, "Sunny"),
        ];
        let series = time_series(&records);
        let cities: Vec<&str> = series.iter().map(|p| p.city.as_str()).collect();
        // Same-day rows keep their input order.
        assert_eq!(cities, vec!["Delhi", "Chennai", "Mumbai"]);
    }

    #[test]
    fn median_split_guards_the_empty_table() {
        assert_eq!(median_split(&[]), None);
    }

    #[test]
    fn median_split_single_row_has_no_cool_side() {
        let records = vec![record("Mumbai", 10, 180.0, 32.0, None, "Sunny")];
        let split = median_split(&records).unwrap();
        assert_eq!(split.median_temp_c, 32.0);
        assert_eq!(split.avg_runs_hot_days, Some(180.0));
        assert_eq!(split.avg_runs_cool_days, None);
    }

    #[test]
    fn median_split_means() {
        let records = vec![
            record("Mumbai", 10, 180.0, 34.0, None, "Sunny"),
            record("Delhi", 11, 160.0, 30.0, None, "Cloudy"),
            record("Chennai", 12, 140.0, 26.0, None, "Rain"),
        ];
        let split = median_split(&records).unwrap();
        assert_eq!(split.median_temp_c, 30.0);
        assert_eq!(split.avg_runs_hot_days, Some(170.0));
        assert_eq!(split.avg_runs_cool_days, Some(140.0));
    }
}
