//! Filter-options handler.

use axum::{extract::State, Json};
use pitchside::filter;
use serde::Serialize;

use crate::server::error::ApiError;
use crate::server::state::AppState;

/// The options a filter sidebar offers, with the select-all defaults.
#[derive(Serialize)]
pub struct FilterOptionsResponse {
    /// Distinct seasons, or null when the dataset has no season column
    /// (the frontend hides the season control entirely).
    pub seasons: Option<Vec<String>>,
    pub cities: Vec<String>,
    pub teams: Vec<String>,
    /// Actual (min, max) of temp_c over the merged table.
    pub temp_extent: Option<(f64, f64)>,
    /// Default slider range: the extent widened by one degree per side.
    pub default_temp_range: (f64, f64),
}

/// Get the available filter options for the merged table.
pub async fn get_filter_options(
    State(state): State<AppState>,
) -> Result<Json<FilterOptionsResponse>, ApiError> {
    let prepared = state.prepared().await?;
    let records = &prepared.merged.records;

    let defaults = pitchside::FilterSpec::select_all(records);

    Ok(Json(FilterOptionsResponse {
        seasons: filter::seasons(records),
        cities: filter::cities(records),
        teams: filter::teams(records),
        temp_extent: filter::temp_extent(records),
        default_temp_range: defaults.temp_range,
    }))
}
