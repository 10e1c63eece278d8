//! Merged-table preview and reload handlers.

use axum::{extract::State, Json};
use pitchside::{export, LoadReport};
use serde::Serialize;

use crate::server::error::ApiError;
use crate::server::state::AppState;

/// Maximum number of rows to return in a preview.
const MAX_PREVIEW_ROWS: usize = 200;

/// Response for the data preview endpoint.
#[derive(Serialize)]
pub struct DataResponse {
    /// Column names in layout order.
    pub columns: Vec<String>,
    /// String-rendered rows (first N).
    pub rows: Vec<Vec<String>>,
    /// Total row count in the merged table.
    pub total_rows: usize,
    /// Whether the preview was truncated.
    pub truncated: bool,
    pub match_report: LoadReport,
    pub weather_report: LoadReport,
}

/// Get a preview of the merged table.
pub async fn get_data(State(state): State<AppState>) -> Result<Json<DataResponse>, ApiError> {
    let prepared = state.prepared().await?;

    let total_rows = prepared.merged.len();
    let rows: Vec<Vec<String>> = prepared
        .merged
        .records
        .iter()
        .take(MAX_PREVIEW_ROWS)
        .map(|record| {
            prepared
                .merged
                .columns
                .iter()
                .map(|column| export::cell(record, column))
                .collect()
        })
        .collect();

    Ok(Json(DataResponse {
        columns: prepared.merged.columns.clone(),
        rows,
        total_rows,
        truncated: total_rows > MAX_PREVIEW_ROWS,
        match_report: prepared.match_report.clone(),
        weather_report: prepared.weather_report.clone(),
    }))
}

/// Response for the reload endpoint.
#[derive(Serialize)]
pub struct ReloadResponse {
    pub total_rows: usize,
    pub match_report: LoadReport,
    pub weather_report: LoadReport,
}

/// Invalidate the preparation cache and re-run the pipeline.
pub async fn reload(State(state): State<AppState>) -> Result<Json<ReloadResponse>, ApiError> {
    let prepared = state.reload().await?;

    Ok(Json(ReloadResponse {
        total_rows: prepared.merged.len(),
        match_report: prepared.match_report.clone(),
        weather_report: prepared.weather_report.clone(),
    }))
}
