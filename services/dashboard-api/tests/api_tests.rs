//! Handler-level tests for the dashboard API.
//!
//! Handlers are exercised directly with a fixture snapshot; no listener or
//! live store is needed.

use std::sync::Arc;

use axum::extract::{Extension, Query};
use metrics_exporter_prometheus::PrometheusBuilder;

use dashboard_api::handlers::daily::daily_handler;
use dashboard_api::handlers::stations::{range_handler, stations_handler};
use dashboard_api::handlers::summary::{summary_handler, SummaryParams};
use dashboard_api::selection::SelectionParams;
use dashboard_api::state::AppState;
use precip_common::PrecipError;
use storage::DailyDataset;
use test_utils::{date, day_table, sample_registry};

/// Seven days of data for two stations, with one silent day for Churanov.
fn fixture_state() -> Arc<AppState> {
    let registry = sample_registry();
    let mut tables = Vec::new();
    for day in 1..=7 {
        let day_str = format!("2024-04-{:02}", day);
        if day == 4 {
            // Churanov reports nothing on the 4th
            tables.push(day_table(&day_str, &[("Praha Ruzyne", day as f64)]));
        } else {
            tables.push(day_table(
                &day_str,
                &[("Praha Ruzyne", day as f64), ("Churanov", 2.0 * day as f64)],
            ));
        }
    }
    let dataset = DailyDataset::from_tables(&tables, &registry);

    let metrics = PrometheusBuilder::new().build_recorder().handle();

    Arc::new(AppState {
        dataset,
        registry,
        metrics,
    })
}

fn selection(start: &str, end: &str, stations: &str) -> SelectionParams {
    SelectionParams {
        start: Some(start.to_string()),
        end: Some(end.to_string()),
        stations: Some(stations.to_string()),
    }
}

#[tokio::test]
async fn test_daily_returns_one_value_per_day_per_station() {
    let state = fixture_state();

    let response = daily_handler(
        Extension(state),
        Query(selection("2024-04-01", "2024-04-07", "Praha-Ruzyne,Churanov")),
    )
    .await
    .unwrap();

    let body = response.0;
    assert_eq!(body.dates.len(), 7);
    assert_eq!(body.series.len(), 2);
    for series in &body.series {
        assert_eq!(series.values.len(), 7);
    }

    let churanov = body.series.iter().find(|s| s.station == "Churanov").unwrap();
    assert_eq!(churanov.values[0], Some(2.0));
    // the silent day comes back as null, not 0.0
    assert_eq!(churanov.values[3], None);
}

#[tokio::test]
async fn test_daily_clamps_range_to_dataset() {
    let state = fixture_state();

    let response = daily_handler(
        Extension(state),
        Query(selection("2023-01-01", "2025-01-01", "Praha-Ruzyne")),
    )
    .await
    .unwrap();

    let body = response.0;
    assert_eq!(body.start, date("2024-04-01"));
    assert_eq!(body.end, date("2024-04-07"));
    assert_eq!(body.dates.len(), 7);
}

#[tokio::test]
async fn test_daily_unknown_station_is_not_found() {
    let state = fixture_state();

    let err = daily_handler(
        Extension(state),
        Query(selection("2024-04-01", "2024-04-07", "Atlantis")),
    )
    .await
    .unwrap_err();

    assert!(matches!(err.0, PrecipError::StationNotFound(_)));
    assert_eq!(err.0.http_status_code(), 404);
}

#[tokio::test]
async fn test_summary_one_row_per_station() {
    let state = fixture_state();

    let params = SummaryParams {
        start: Some("2024-04-01".to_string()),
        end: Some("2024-04-07".to_string()),
        stations: Some("Praha-Ruzyne,Churanov".to_string()),
        stat: None,
    };
    let response = summary_handler(Extension(state), Query(params)).await.unwrap();

    let body = response.0;
    assert_eq!(body.stat, "sum");
    assert_eq!(body.rows.len(), 2);

    let praha = body.rows.iter().find(|r| r.station == "Praha-Ruzyne").unwrap();
    assert_eq!(praha.days_with_data, 7);
    // 1 + 2 + ... + 7
    assert_eq!(praha.value, Some(28.0));

    let churanov = body.rows.iter().find(|r| r.station == "Churanov").unwrap();
    assert_eq!(churanov.days_with_data, 6);
    // 2 * (1 + 2 + 3 + 5 + 6 + 7)
    assert_eq!(churanov.value, Some(48.0));
}

#[tokio::test]
async fn test_summary_mean_over_reported_days() {
    let state = fixture_state();

    let params = SummaryParams {
        start: Some("2024-04-01".to_string()),
        end: Some("2024-04-07".to_string()),
        stations: Some("Churanov".to_string()),
        stat: Some("mean".to_string()),
    };
    let response = summary_handler(Extension(state), Query(params)).await.unwrap();

    let row = &response.0.rows[0];
    assert_eq!(row.days_with_data, 6);
    assert_eq!(row.value, Some(8.0));
}

#[tokio::test]
async fn test_summary_rejects_unknown_stat() {
    let state = fixture_state();

    let params = SummaryParams {
        start: None,
        end: None,
        stations: Some("Churanov".to_string()),
        stat: Some("median".to_string()),
    };
    let err = summary_handler(Extension(state), Query(params)).await.unwrap_err();

    assert!(matches!(err.0, PrecipError::InvalidParameter { .. }));
    assert_eq!(err.0.http_status_code(), 400);
}

#[tokio::test]
async fn test_range_reports_dataset_bounds() {
    let state = fixture_state();

    let response = range_handler(Extension(state)).await.unwrap();
    assert_eq!(response.0.start, date("2024-04-01"));
    assert_eq!(response.0.end, date("2024-04-07"));
}

#[tokio::test]
async fn test_range_on_empty_dataset_is_not_found() {
    let registry = sample_registry();
    let dataset = DailyDataset::from_tables(&[], &registry);
    let metrics = PrometheusBuilder::new().build_recorder().handle();
    let state = Arc::new(AppState {
        dataset,
        registry,
        metrics,
    });

    let err = range_handler(Extension(state)).await.unwrap_err();
    assert!(matches!(err.0, PrecipError::EmptyDataset));
}

#[tokio::test]
async fn test_stations_listing_marks_data_presence() {
    let state = fixture_state();

    let response = stations_handler(Extension(state)).await;
    let entries = response.0;
    assert_eq!(entries.len(), 3);

    // sorted by canonical name
    assert_eq!(entries[0].station.name, "Brno-Turany");
    assert!(!entries[0].has_data);
    assert!(entries.iter().any(|e| e.station.name == "Churanov" && e.has_data));
}
