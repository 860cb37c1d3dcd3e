//! Validation of dashboard selections (date range + stations).

use serde::Deserialize;

use precip_common::{parse_date, DateRange, PrecipError};
use storage::{DailyDataset, StationRegistry};

/// Raw query parameters shared by the data endpoints.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SelectionParams {
    /// Range start, ISO date. Defaults to the dataset minimum.
    pub start: Option<String>,
    /// Range end, ISO date. Defaults to the dataset maximum.
    pub end: Option<String>,
    /// Comma-separated canonical station names.
    pub stations: Option<String>,
}

/// A validated selection: known stations and a range clamped to the data.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    pub stations: Vec<String>,
    pub range: DateRange,
}

/// Resolve raw parameters against the dataset.
///
/// Policy: out-of-bounds dates are clamped to the dataset bounds; an
/// inverted or non-overlapping range and an unknown station are errors.
pub fn resolve_selection(
    params: &SelectionParams,
    dataset: &DailyDataset,
    registry: &StationRegistry,
) -> Result<Selection, PrecipError> {
    let bounds = dataset.date_bounds().ok_or(PrecipError::EmptyDataset)?;

    let stations_param = params
        .stations
        .as_deref()
        .filter(|s| !s.trim().is_empty())
        .ok_or_else(|| PrecipError::MissingParameter("stations".to_string()))?;

    let mut stations = Vec::new();
    for name in stations_param.split(',') {
        let name = name.trim();
        if name.is_empty() {
            continue;
        }
        if !dataset.has_station(name) && registry.by_name(name).is_none() {
            return Err(PrecipError::StationNotFound(name.to_string()));
        }
        if !stations.iter().any(|s| s == name) {
            stations.push(name.to_string());
        }
    }
    if stations.is_empty() {
        return Err(PrecipError::MissingParameter("stations".to_string()));
    }

    let start = match &params.start {
        Some(s) => parse_date(s)?,
        None => bounds.start,
    };
    let end = match &params.end {
        Some(s) => parse_date(s)?,
        None => bounds.end,
    };

    let range = DateRange::new(start, end)?;
    let range = range.clamp_to(&bounds).ok_or_else(|| {
        PrecipError::InvalidRange(format!(
            "{} to {} does not overlap the recorded data ({} to {})",
            start, end, bounds.start, bounds.end
        ))
    })?;

    Ok(Selection { stations, range })
}
