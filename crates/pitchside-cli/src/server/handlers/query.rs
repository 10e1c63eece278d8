//! Query handler: filtered rows, aggregates, and chart series.

use axum::{extract::State, Json};
use pitchside::summary::{
    mean_runs_by_bucket, mean_runs_by_weather_type, median_split, scatter_points, time_series,
    BucketMean, MedianSplit, ScatterPoint, SeriesPoint, WeatherTypeMean,
};
use pitchside::{FilterSpec, Summary};
use serde::Serialize;

use crate::server::error::ApiError;
use crate::server::state::AppState;

/// Everything the charting frontend needs for one filter interaction.
#[derive(Serialize)]
pub struct QueryResponse {
    /// True when the selection matches nothing; aggregates are absent and
    /// `notice` carries the message to display instead of charts.
    pub empty: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
    pub matched_rows: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<Summary>,
    pub scatter: Vec<ScatterPoint>,
    pub series: Vec<SeriesPoint>,
    pub buckets: Vec<BucketMean>,
    pub weather_types: Vec<WeatherTypeMean>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub insight: Option<MedianSplit>,
}

/// Apply a filter spec and return aggregates plus chart series.
pub async fn run_query(
    State(state): State<AppState>,
    Json(spec): Json<FilterSpec>,
) -> Result<Json<QueryResponse>, ApiError> {
    let prepared = state.prepared().await?;
    let rows = spec.apply(&prepared.merged.records);

    let Some(summary) = Summary::compute(&rows) else {
        return Ok(Json(QueryResponse {
            empty: true,
            notice: Some(
                "No data after applying filters. Try expanding your selections.".to_string(),
            ),
            matched_rows: 0,
            summary: None,
            scatter: Vec::new(),
            series: Vec::new(),
            buckets: Vec::new(),
            weather_types: Vec::new(),
            insight: None,
        }));
    };

    Ok(Json(QueryResponse {
        empty: false,
        notice: None,
        matched_rows: rows.len(),
        summary: Some(summary),
        scatter: scatter_points(&rows),
        series: time_series(&rows),
        buckets: mean_runs_by_bucket(&rows),
        weather_types: mean_runs_by_weather_type(&rows),
        insight: median_split(&rows),
    }))
}
