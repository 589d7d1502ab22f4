//! HTTP handlers for the read-only dataset and language table

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;
use shared::{HistoricalRecord, LanguageOption, LANGUAGES};

use crate::error::{AppError, AppResult};
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct DistrictsResponse {
    pub districts: Vec<String>,
    pub latest_year: i32,
    pub forecast_year: i32,
}

/// List districts covered by the dataset
/// GET /districts
pub async fn list_districts(State(state): State<AppState>) -> Json<DistrictsResponse> {
    Json(DistrictsResponse {
        districts: state
            .dataset
            .districts()
            .into_iter()
            .map(str::to_string)
            .collect(),
        latest_year: state.dataset.latest_year(),
        forecast_year: state.dataset.forecast_year(),
    })
}

/// Historical rows for one district, ascending by year
/// GET /districts/:district/records
pub async fn get_district_records(
    State(state): State<AppState>,
    Path(district): Path<String>,
) -> AppResult<Json<Vec<HistoricalRecord>>> {
    let records = state.dataset.for_district(&district);
    if records.is_empty() {
        return Err(AppError::NotFound(format!("District '{}'", district)));
    }
    Ok(Json(records))
}

/// Languages the assistant can answer in
/// GET /languages
pub async fn list_languages() -> Json<&'static [LanguageOption]> {
    Json(LANGUAGES)
}
