//! Station list and dataset range handlers.

use std::sync::Arc;

use axum::{extract::Extension, Json};
use chrono::NaiveDate;
use metrics::counter;
use serde::Serialize;

use precip_common::{PrecipError, Station};

use crate::handlers::ApiResult;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct StationEntry {
    #[serde(flatten)]
    pub station: Station,
    /// Whether the dataset holds at least one reading for this station.
    pub has_data: bool,
}

/// GET /api/stations - Known stations with metadata
pub async fn stations_handler(
    Extension(state): Extension<Arc<AppState>>,
) -> Json<Vec<StationEntry>> {
    counter!("dashboard_requests_total", "endpoint" => "stations").increment(1);

    let entries = state
        .registry
        .stations()
        .iter()
        .map(|station| StationEntry {
            station: station.clone(),
            has_data: state.dataset.has_station(&station.name),
        })
        .collect();

    Json(entries)
}

#[derive(Debug, Serialize)]
pub struct RangeResponse {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// GET /api/range - Min/max recorded date of the dataset
pub async fn range_handler(
    Extension(state): Extension<Arc<AppState>>,
) -> ApiResult<Json<RangeResponse>> {
    counter!("dashboard_requests_total", "endpoint" => "range").increment(1);

    let bounds = state
        .dataset
        .date_bounds()
        .ok_or(PrecipError::EmptyDataset)?;

    Ok(Json(RangeResponse {
        start: bounds.start,
        end: bounds.end,
    }))
}
