//! Typed rows for the match, weather, and merged tables.

use chrono::NaiveDate;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// One cricket match, normalized.
///
/// `date` and `city` are guaranteed non-null: rows that fail date parsing
/// or carry a null city never become records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub date: NaiveDate,
    /// Trimmed, case-preserving.
    pub city: String,
    pub total_runs: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub season: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team1: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team2: Option<String>,
    /// Passthrough columns (venue, ...) in source order.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub extra: IndexMap<String, String>,
}

/// One daily weather observation, normalized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherRecord {
    pub date: NaiveDate,
    /// Trimmed, case-preserving.
    pub city: String,
    pub temp_c: f64,
    /// None when the column is absent or the value is blank.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub humidity: Option<f64>,
    /// "Unknown" when the column is absent or the value is blank.
    pub weather_type: String,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub extra: IndexMap<String, String>,
}

/// Fixed-boundary discretization of `temp_c` into four ordered labels.
///
/// Boundary values fall into the lower bucket; the lowest bucket is
/// unbounded below.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TempBucket {
    #[serde(rename = "Cool (<=25)")]
    Cool,
    #[serde(rename = "Warm (26-30)")]
    Warm,
    #[serde(rename = "Hot (31-35)")]
    Hot,
    #[serde(rename = "Very Hot (>35)")]
    VeryHot,
}

impl TempBucket {
    /// Bucket a temperature.
    pub fn from_temp_c(temp_c: f64) -> Self {
        if temp_c <= 25.0 {
            TempBucket::Cool
        } else if temp_c <= 30.0 {
            TempBucket::Warm
        } else if temp_c <= 35.0 {
            TempBucket::Hot
        } else {
            TempBucket::VeryHot
        }
    }

    /// Display label, as it appears in exports and chart axes.
    pub fn label(&self) -> &'static str {
        match self {
            TempBucket::Cool => "Cool (<=25)",
            TempBucket::Warm => "Warm (26-30)",
            TempBucket::Hot => "Hot (31-35)",
            TempBucket::VeryHot => "Very Hot (>35)",
        }
    }

    /// All buckets in ascending temperature order.
    pub fn all() -> [TempBucket; 4] {
        [
            TempBucket::Cool,
            TempBucket::Warm,
            TempBucket::Hot,
            TempBucket::VeryHot,
        ]
    }
}

impl std::fmt::Display for TempBucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// One row of the inner join of match and weather on (date, city).
///
/// Carries every column from both sides plus the two derived fields.
/// Passthrough columns whose names collide across the sides are suffixed
/// `_match` / `_weather` in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MergedRecord {
    pub date: NaiveDate,
    pub city: String,
    /// Canonical string rendering of the join-key date, for display.
    pub date_str: String,
    pub total_runs: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub season: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team1: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team2: Option<String>,
    pub temp_c: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub humidity: Option<f64>,
    pub weather_type: String,
    pub temp_bucket: TempBucket,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub extra: IndexMap<String, String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bucket_boundaries_fall_low() {
        assert_eq!(TempBucket::from_temp_c(25.0), TempBucket::Cool);
        assert_eq!(TempBucket::from_temp_c(25.1), TempBucket::Warm);
        assert_eq!(TempBucket::from_temp_c(30.0), TempBucket::Warm);
        assert_eq!(TempBucket::from_temp_c(35.0), TempBucket::Hot);
        assert_eq!(TempBucket::from_temp_c(35.1), TempBucket::VeryHot);
    }

    #[test]
    fn lowest_bucket_is_unbounded_below() {
        assert_eq!(TempBucket::from_temp_c(0.0), TempBucket::Cool);
        assert_eq!(TempBucket::from_temp_c(-40.0), TempBucket::Cool);
    }

    #[test]
    fn buckets_are_ordered() {
        let all = TempBucket::all();
        for pair in all.windows(2) {
            assert!(pair[0] < pair[1]);
        }
    }

    #[test]
    fn labels() {
        assert_eq!(TempBucket::from_temp_c(25.0).label(), "Cool (<=25)");
        assert_eq!(TempBucket::from_temp_c(26.0).label(), "Warm (26-30)");
        assert_eq!(TempBucket::from_temp_c(33.0).label(), "Hot (31-35)");
        assert_eq!(TempBucket::from_temp_c(40.0).label(), "Very Hot (>35)");
    }
}
