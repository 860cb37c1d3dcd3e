//! CSV encoding of one-day precipitation tables.
//!
//! A day file holds the wide table exactly as fetched: one row per station,
//! header `station,h1..h24`. Blank cells are hours the station did not
//! report, as opposed to an explicit 0.0.

use std::io::{Read, Write};

use chrono::NaiveDate;

use precip_common::{DayTable, PrecipError, StationDayRow, HOURS_PER_DAY};

/// Serialize a day table as CSV.
pub fn write_day_csv<W: Write>(writer: W, table: &DayTable) -> Result<(), PrecipError> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    let mut header = Vec::with_capacity(HOURS_PER_DAY + 1);
    header.push("station".to_string());
    for hour in 1..=HOURS_PER_DAY {
        header.push(format!("h{}", hour));
    }
    csv_writer
        .write_record(&header)
        .map_err(|e| PrecipError::StorageError(format!("CSV write failed: {}", e)))?;

    for row in &table.rows {
        let mut record = Vec::with_capacity(HOURS_PER_DAY + 1);
        record.push(row.station.clone());
        for hour in 0..HOURS_PER_DAY {
            let cell = row
                .hourly
                .get(hour)
                .copied()
                .flatten()
                .map(|v| format!("{}", v))
                .unwrap_or_default();
            record.push(cell);
        }
        csv_writer
            .write_record(&record)
            .map_err(|e| PrecipError::StorageError(format!("CSV write failed: {}", e)))?;
    }

    csv_writer
        .flush()
        .map_err(|e| PrecipError::StorageError(format!("CSV flush failed: {}", e)))?;

    Ok(())
}

/// Parse a day file back into a table.
///
/// `date` comes from the filename; the file itself does not repeat it.
pub fn read_day_csv<R: Read>(reader: R, date: NaiveDate) -> Result<DayTable, PrecipError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(reader);

    let mut rows = Vec::new();

    for record in csv_reader.records() {
        let record =
            record.map_err(|e| PrecipError::StorageError(format!("CSV read failed: {}", e)))?;

        let station = record
            .get(0)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| {
                PrecipError::StorageError(format!("day file {}: row without station name", date))
            })?
            .to_string();

        let mut hourly = Vec::with_capacity(HOURS_PER_DAY);
        for hour in 0..HOURS_PER_DAY {
            let cell = record.get(hour + 1).unwrap_or("").trim();
            if cell.is_empty() {
                hourly.push(None);
            } else {
                let value = cell.parse::<f64>().map_err(|_| {
                    PrecipError::StorageError(format!(
                        "day file {}: bad value '{}' for station {}",
                        date, cell, station
                    ))
                })?;
                hourly.push(Some(value));
            }
        }

        rows.push(StationDayRow { station, hourly });
    }

    Ok(DayTable::new(date, rows))
}
