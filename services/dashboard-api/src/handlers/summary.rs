//! Per-station summary statistics handler.

use std::sync::Arc;

use axum::{
    extract::{Extension, Query},
    Json,
};
use chrono::NaiveDate;
use metrics::counter;
use serde::{Deserialize, Serialize};

use precip_common::PrecipError;

use crate::handlers::ApiResult;
use crate::selection::{resolve_selection, SelectionParams};
use crate::state::AppState;

/// Aggregation over a station's daily totals in the window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stat {
    /// Precipitation total (mm).
    Sum,
    /// Daily mean (mm).
    Mean,
    /// Sample variance of the daily totals.
    Var,
}

impl Stat {
    fn parse(s: &str) -> Result<Self, PrecipError> {
        match s {
            "sum" => Ok(Stat::Sum),
            "mean" => Ok(Stat::Mean),
            "var" => Ok(Stat::Var),
            other => Err(PrecipError::InvalidParameter {
                param: "stat".to_string(),
                message: format!("'{}' is not one of sum, mean, var", other),
            }),
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Stat::Sum => "sum",
            Stat::Mean => "mean",
            Stat::Var => "var",
        }
    }

    /// Apply the statistic to the days the station actually reported.
    fn apply(&self, values: &[f64]) -> Option<f64> {
        if values.is_empty() {
            return None;
        }
        let n = values.len() as f64;
        let sum: f64 = values.iter().sum();
        match self {
            Stat::Sum => Some(sum),
            Stat::Mean => Some(sum / n),
            Stat::Var => {
                // sample variance; undefined for a single observation
                if values.len() < 2 {
                    return None;
                }
                let mean = sum / n;
                let squares: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();
                Some(squares / (n - 1.0))
            }
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SummaryParams {
    pub start: Option<String>,
    pub end: Option<String>,
    pub stations: Option<String>,
    pub stat: Option<String>,
}

impl SummaryParams {
    fn selection(&self) -> SelectionParams {
        SelectionParams {
            start: self.start.clone(),
            end: self.end.clone(),
            stations: self.stations.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SummaryResponse {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub stat: &'static str,
    pub rows: Vec<SummaryRow>,
}

#[derive(Debug, Serialize)]
pub struct SummaryRow {
    pub station: String,
    /// Statistic value, `null` when the station reported nothing in the
    /// window (or a single day, for variance).
    pub value: Option<f64>,
    /// Days with a reading inside the window.
    pub days_with_data: usize,
}

/// GET /api/summary?start&end&stations=a,b&stat=sum - Window summary
pub async fn summary_handler(
    Extension(state): Extension<Arc<AppState>>,
    Query(params): Query<SummaryParams>,
) -> ApiResult<Json<SummaryResponse>> {
    counter!("dashboard_requests_total", "endpoint" => "summary").increment(1);

    let stat = match &params.stat {
        Some(s) => Stat::parse(s)?,
        None => Stat::Sum,
    };
    let selection = resolve_selection(&params.selection(), &state.dataset, &state.registry)?;

    let rows = selection
        .stations
        .iter()
        .map(|station| {
            let values: Vec<f64> = state
                .dataset
                .readings(station, &selection.range)
                .into_iter()
                .map(|r| r.amount_mm)
                .collect();
            SummaryRow {
                station: station.clone(),
                value: stat.apply(&values),
                days_with_data: values.len(),
            }
        })
        .collect();

    Ok(Json(SummaryResponse {
        start: selection.range.start,
        end: selection.range.end,
        stat: stat.name(),
        rows,
    }))
}
