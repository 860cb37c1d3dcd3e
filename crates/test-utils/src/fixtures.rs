//! Common test fixtures for czrain tests.

use chrono::NaiveDate;
use tempfile::TempDir;

use precip_common::{DayTable, StationDayRow, HOURS_PER_DAY};
use storage::{DailyStore, StationRegistry};

/// Parse a `YYYY-MM-DD` date, panicking on bad input.
pub fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").expect("bad fixture date")
}

/// A station row whose daily total is `amount`, spread over two hours.
pub fn station_row(station: &str, amount: f64) -> StationDayRow {
    let mut hourly = vec![None; HOURS_PER_DAY];
    hourly[7] = Some(amount / 2.0);
    hourly[8] = Some(amount - amount / 2.0);
    StationDayRow::new(station, hourly)
}

/// A station row with no reported hours.
pub fn silent_station_row(station: &str) -> StationDayRow {
    StationDayRow::new(station, vec![None; HOURS_PER_DAY])
}

/// A one-day table with the given `(station, daily total)` pairs.
pub fn day_table(day: &str, stations: &[(&str, f64)]) -> DayTable {
    DayTable::new(
        date(day),
        stations
            .iter()
            .map(|(name, amount)| station_row(name, *amount))
            .collect(),
    )
}

/// A temporary store seeded with the given day tables.
///
/// Keep the returned `TempDir` alive for the duration of the test.
pub fn seeded_store(tables: &[DayTable]) -> (TempDir, DailyStore) {
    let dir = TempDir::new().expect("temp dir");
    let store = DailyStore::open(dir.path()).expect("open store");
    for table in tables {
        store.write_day(table).expect("seed day");
    }
    (dir, store)
}

/// Registry CSV with a handful of stations whose source spelling differs
/// from the canonical name.
pub const SAMPLE_STATIONS_CSV: &str = "\
id,name,source_name,lat,lon,elevation_m,type
B2BTUR01,Brno-Turany,Brno - Turany,49.1531,16.6889,241,AKU
C1CKRU01,Churanov,Churanov,49.0681,13.6147,1118,AKU
P1PRUZ01,Praha-Ruzyne,Praha Ruzyne,50.1003,14.2555,364,AKU
";

/// Registry built from [`SAMPLE_STATIONS_CSV`].
pub fn sample_registry() -> StationRegistry {
    StationRegistry::from_reader(SAMPLE_STATIONS_CSV.as_bytes()).expect("sample registry")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_station_row_total_matches() {
        let row = station_row("Praha-Ruzyne", 3.3);
        assert!((row.daily_total().unwrap() - 3.3).abs() < 1e-9);
    }

    #[test]
    fn test_seeded_store_contains_days() {
        let (_dir, store) = seeded_store(&[
            day_table("2024-04-01", &[("A", 1.0)]),
            day_table("2024-04-02", &[("A", 2.0)]),
        ]);
        assert_eq!(store.dates().unwrap().len(), 2);
    }

    #[test]
    fn test_sample_registry_loads() {
        let registry = sample_registry();
        assert_eq!(registry.len(), 3);
        assert_eq!(registry.canonical_name("Praha Ruzyne"), "Praha-Ruzyne");
    }
}
