//! Precipitation reading types.
//!
//! The CHMI source reports 24 hourly values per station per day. A
//! [`DayTable`] holds one day of those wide rows exactly as fetched; a
//! [`StationReading`] is the long-format daily total derived from them.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Number of hourly columns in a day table.
pub const HOURS_PER_DAY: usize = 24;

/// One station's row for a single day: 24 hourly precipitation values in mm.
///
/// A `None` hour means the station did not report that hour (blank cell in
/// the source table), which is distinct from a reported 0.0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationDayRow {
    /// Station name as reported by the source.
    pub station: String,
    /// Hourly precipitation in mm, index 0 = hour "1" of the source table.
    pub hourly: Vec<Option<f64>>,
}

impl StationDayRow {
    pub fn new(station: impl Into<String>, hourly: Vec<Option<f64>>) -> Self {
        Self {
            station: station.into(),
            hourly,
        }
    }

    /// Daily total over the hours the station reported.
    ///
    /// Returns `None` when no hour was reported at all, so a silent station
    /// is distinguishable from a dry one.
    pub fn daily_total(&self) -> Option<f64> {
        let mut total = 0.0;
        let mut reported = false;
        for value in self.hourly.iter().flatten() {
            total += value;
            reported = true;
        }
        reported.then_some(total)
    }
}

/// One day of precipitation data for all stations, as fetched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayTable {
    /// Measurement date reported by the source.
    pub date: NaiveDate,
    pub rows: Vec<StationDayRow>,
}

impl DayTable {
    pub fn new(date: NaiveDate, rows: Vec<StationDayRow>) -> Self {
        Self { date, rows }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }
}

/// A single daily observation: station, date, precipitation amount.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationReading {
    pub station: String,
    pub date: NaiveDate,
    /// Daily precipitation total in mm.
    pub amount_mm: f64,
}
