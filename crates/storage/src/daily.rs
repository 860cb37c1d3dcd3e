//! Daily dataset snapshot for the dashboard.
//!
//! Folds the per-date day files into daily totals per station, keyed by
//! canonical station name. The snapshot is built once at startup and read
//! concurrently without locking; the fetcher's atomic day writes mean a
//! rebuild only ever sees whole days.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use tracing::{info, warn};

use precip_common::{DateRange, DayTable, PrecipError, StationReading};

use crate::registry::StationRegistry;
use crate::store::DailyStore;

/// Immutable snapshot of daily precipitation totals.
#[derive(Debug, Clone, Default)]
pub struct DailyDataset {
    /// canonical station name -> date -> daily total (mm)
    values: BTreeMap<String, BTreeMap<NaiveDate, f64>>,
    bounds: Option<DateRange>,
    reading_count: usize,
}

impl DailyDataset {
    /// Load the snapshot from a store, normalizing station names through
    /// the registry.
    pub fn load(store: &DailyStore, registry: &StationRegistry) -> Result<Self, PrecipError> {
        let tables = store.read_all()?;
        let dataset = Self::from_tables(&tables, registry);
        info!(
            stations = dataset.values.len(),
            readings = dataset.reading_count,
            days = tables.len(),
            "Loaded daily dataset"
        );
        Ok(dataset)
    }

    /// Build the snapshot from in-memory day tables.
    pub fn from_tables(tables: &[DayTable], registry: &StationRegistry) -> Self {
        let mut values: BTreeMap<String, BTreeMap<NaiveDate, f64>> = BTreeMap::new();
        let mut min_date: Option<NaiveDate> = None;
        let mut max_date: Option<NaiveDate> = None;
        let mut reading_count = 0usize;

        for table in tables {
            min_date = Some(min_date.map_or(table.date, |d| d.min(table.date)));
            max_date = Some(max_date.map_or(table.date, |d| d.max(table.date)));

            for row in &table.rows {
                let Some(total) = row.daily_total() else {
                    continue;
                };
                let name = registry.canonical_name(&row.station).to_string();
                let per_station = values.entry(name).or_default();
                if per_station.insert(table.date, total).is_some() {
                    // One file per date and one row per station is the store
                    // invariant; a collision means two source names mapped to
                    // the same canonical station.
                    warn!(
                        station = %row.station,
                        date = %table.date,
                        "Duplicate reading for station/date, keeping the later row"
                    );
                    continue;
                }
                reading_count += 1;
            }
        }

        let bounds = match (min_date, max_date) {
            (Some(start), Some(end)) => Some(DateRange { start, end }),
            _ => None,
        };

        Self {
            values,
            bounds,
            reading_count,
        }
    }

    /// Min/max recorded date, or `None` for an empty dataset.
    pub fn date_bounds(&self) -> Option<DateRange> {
        self.bounds
    }

    /// Station names with at least one reading, sorted.
    pub fn station_names(&self) -> Vec<&str> {
        self.values.keys().map(|s| s.as_str()).collect()
    }

    pub fn has_station(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Total number of (station, date) readings.
    pub fn reading_count(&self) -> usize {
        self.reading_count
    }

    /// Daily series for one station over a range: one entry per day,
    /// `None` for days the station did not report.
    ///
    /// Returns `None` for a station absent from the dataset entirely.
    pub fn series(
        &self,
        station: &str,
        range: &DateRange,
    ) -> Option<Vec<(NaiveDate, Option<f64>)>> {
        let per_station = self.values.get(station)?;
        Some(
            range
                .iter_days()
                .map(|date| (date, per_station.get(&date).copied()))
                .collect(),
        )
    }

    /// All readings for one station over a range, as long-format rows.
    pub fn readings(&self, station: &str, range: &DateRange) -> Vec<StationReading> {
        let Some(per_station) = self.values.get(station) else {
            return Vec::new();
        };
        per_station
            .range(range.start..=range.end)
            .map(|(&date, &amount_mm)| StationReading {
                station: station.to_string(),
                date,
                amount_mm,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use precip_common::{StationDayRow, HOURS_PER_DAY};

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn row(station: &str, amount: Option<f64>) -> StationDayRow {
        let mut hourly = vec![None; HOURS_PER_DAY];
        if let Some(v) = amount {
            hourly[5] = Some(v);
        }
        StationDayRow::new(station, hourly)
    }

    fn empty_registry() -> StationRegistry {
        StationRegistry::from_reader("id,name,source_name,lat,lon,elevation_m,type\n".as_bytes())
            .unwrap()
    }

    #[test]
    fn test_bounds_and_series() {
        let tables = vec![
            DayTable::new(date("2024-04-01"), vec![row("A", Some(1.0)), row("B", Some(0.0))]),
            DayTable::new(date("2024-04-02"), vec![row("A", Some(2.5)), row("B", None)]),
            DayTable::new(date("2024-04-03"), vec![row("A", Some(0.0))]),
        ];
        let dataset = DailyDataset::from_tables(&tables, &empty_registry());

        let bounds = dataset.date_bounds().unwrap();
        assert_eq!(bounds.start, date("2024-04-01"));
        assert_eq!(bounds.end, date("2024-04-03"));

        let range = DateRange::new(date("2024-04-01"), date("2024-04-03")).unwrap();
        let series = dataset.series("A", &range).unwrap();
        assert_eq!(
            series,
            vec![
                (date("2024-04-01"), Some(1.0)),
                (date("2024-04-02"), Some(2.5)),
                (date("2024-04-03"), Some(0.0)),
            ]
        );

        // B reported nothing on the 2nd and is absent on the 3rd
        let series_b = dataset.series("B", &range).unwrap();
        assert_eq!(
            series_b,
            vec![
                (date("2024-04-01"), Some(0.0)),
                (date("2024-04-02"), None),
                (date("2024-04-03"), None),
            ]
        );
    }

    #[test]
    fn test_unknown_station_series_is_none() {
        let dataset = DailyDataset::from_tables(&[], &empty_registry());
        let range = DateRange::new(date("2024-04-01"), date("2024-04-03")).unwrap();
        assert!(dataset.series("Nowhere", &range).is_none());
    }

    #[test]
    fn test_name_normalization() {
        let registry = StationRegistry::from_reader(
            "id,name,source_name,lat,lon,elevation_m,type\n\
             P1,Praha-Ruzyne,Praha Ruzyne,50.1,14.26,364,AKU\n"
                .as_bytes(),
        )
        .unwrap();

        let tables = vec![DayTable::new(
            date("2024-04-01"),
            vec![row("Praha Ruzyne", Some(4.0))],
        )];
        let dataset = DailyDataset::from_tables(&tables, &registry);

        assert!(dataset.has_station("Praha-Ruzyne"));
        assert!(!dataset.has_station("Praha Ruzyne"));
    }

    #[test]
    fn test_reading_count_unique_keys() {
        let tables = vec![
            DayTable::new(date("2024-04-01"), vec![row("A", Some(1.0))]),
            DayTable::new(date("2024-04-02"), vec![row("A", Some(1.0))]),
        ];
        let dataset = DailyDataset::from_tables(&tables, &empty_registry());
        assert_eq!(dataset.reading_count(), 2);
    }
}
