//! Application state for the dashboard API.

use std::path::Path;

use anyhow::{Context, Result};
use metrics_exporter_prometheus::PrometheusHandle;

use storage::{DailyDataset, DailyStore, StationRegistry};

/// Shared application state.
///
/// The dataset is an immutable snapshot loaded at startup; the fetcher's
/// atomic day writes mean a restart only ever picks up whole days.
pub struct AppState {
    /// Daily precipitation totals per station.
    pub dataset: DailyDataset,

    /// Station metadata.
    pub registry: StationRegistry,

    /// Prometheus recorder handle for the /metrics endpoint.
    pub metrics: PrometheusHandle,
}

impl AppState {
    /// Load the snapshot from the day store and station file.
    pub fn load(
        data_dir: &Path,
        stations_file: &Path,
        metrics: PrometheusHandle,
    ) -> Result<Self> {
        let registry = StationRegistry::load(stations_file)
            .with_context(|| format!("Failed to load stations from {}", stations_file.display()))?;

        let store = DailyStore::open(data_dir)
            .with_context(|| format!("Failed to open day store at {}", data_dir.display()))?;

        let dataset = DailyDataset::load(&store, &registry)
            .context("Failed to load the daily dataset")?;

        Ok(Self {
            dataset,
            registry,
            metrics,
        })
    }
}
