//! Daily time series handler.

use std::sync::Arc;

use axum::{
    extract::{Extension, Query},
    Json,
};
use chrono::NaiveDate;
use metrics::counter;
use serde::Serialize;

use crate::handlers::ApiResult;
use crate::selection::{resolve_selection, SelectionParams};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct DailyResponse {
    pub start: NaiveDate,
    pub end: NaiveDate,
    /// One entry per day of the range.
    pub dates: Vec<NaiveDate>,
    pub series: Vec<StationSeries>,
}

#[derive(Debug, Serialize)]
pub struct StationSeries {
    pub station: String,
    /// Daily totals aligned with `dates`; `null` for days without a report.
    pub values: Vec<Option<f64>>,
}

/// GET /api/daily?start&end&stations=a,b - Daily totals per station
pub async fn daily_handler(
    Extension(state): Extension<Arc<AppState>>,
    Query(params): Query<SelectionParams>,
) -> ApiResult<Json<DailyResponse>> {
    counter!("dashboard_requests_total", "endpoint" => "daily").increment(1);

    let selection = resolve_selection(&params, &state.dataset, &state.registry)?;
    let dates: Vec<NaiveDate> = selection.range.iter_days().collect();

    let series = selection
        .stations
        .iter()
        .map(|station| {
            let values = match state.dataset.series(station, &selection.range) {
                Some(series) => series.into_iter().map(|(_, value)| value).collect(),
                // known station without any reading yet
                None => vec![None; dates.len()],
            };
            StationSeries {
                station: station.clone(),
                values,
            }
        })
        .collect();

    Ok(Json(DailyResponse {
        start: selection.range.start,
        end: selection.range.end,
        dates,
        series,
    }))
}
