//! Append-only per-date file store.
//!
//! The store is a flat directory of `YYYY-MM-DD.csv` files, one per
//! measurement date. Writes go through a temp file in the same directory
//! followed by a rename, so a reader never observes a half-written day and
//! a failed run leaves the store untouched. An existing date is never
//! rewritten.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use tracing::{debug, info, warn};

use precip_common::{DayTable, PrecipError};

use crate::day_file;

/// Outcome of a day write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    /// The day file was created.
    Written,
    /// A file for the date already existed; the store is unchanged.
    SkippedExisting,
}

/// File store of daily precipitation tables.
#[derive(Debug, Clone)]
pub struct DailyStore {
    root: PathBuf,
}

impl DailyStore {
    /// Open a store rooted at `root`, creating the directory if needed.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, PrecipError> {
        let root = root.into();
        fs::create_dir_all(&root).map_err(|e| {
            PrecipError::StorageError(format!(
                "failed to create store directory {}: {}",
                root.display(),
                e
            ))
        })?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn day_path(&self, date: NaiveDate) -> PathBuf {
        self.root.join(format!("{}.csv", date.format("%Y-%m-%d")))
    }

    /// Sorted list of dates with a day file in the store.
    ///
    /// Files whose names do not parse as `YYYY-MM-DD.csv` are ignored.
    pub fn dates(&self) -> Result<Vec<NaiveDate>, PrecipError> {
        let mut dates = Vec::new();

        for entry in fs::read_dir(&self.root)? {
            let entry = entry?;
            let name = entry.file_name();
            let Some(name) = name.to_str() else {
                continue;
            };
            let Some(stem) = name.strip_suffix(".csv") else {
                continue;
            };
            if let Ok(date) = NaiveDate::parse_from_str(stem, "%Y-%m-%d") {
                dates.push(date);
            }
        }

        dates.sort();
        Ok(dates)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.day_path(date).exists()
    }

    /// Persist one day atomically.
    ///
    /// Returns [`WriteOutcome::SkippedExisting`] without touching the file
    /// when the date is already present; repeated runs are therefore safe.
    pub fn write_day(&self, table: &DayTable) -> Result<WriteOutcome, PrecipError> {
        let final_path = self.day_path(table.date);

        if final_path.exists() {
            debug!(date = %table.date, "Day file already exists, skipping");
            return Ok(WriteOutcome::SkippedExisting);
        }

        let temp_path = self
            .root
            .join(format!("{}.csv.partial", table.date.format("%Y-%m-%d")));

        let result = (|| -> Result<(), PrecipError> {
            let file = fs::File::create(&temp_path).map_err(|e| {
                PrecipError::StorageError(format!(
                    "failed to create {}: {}",
                    temp_path.display(),
                    e
                ))
            })?;
            day_file::write_day_csv(file, table)?;
            fs::rename(&temp_path, &final_path).map_err(|e| {
                PrecipError::StorageError(format!(
                    "failed to move day file into place: {}",
                    e
                ))
            })?;
            Ok(())
        })();

        if result.is_err() {
            if let Err(e) = fs::remove_file(&temp_path) {
                if e.kind() != std::io::ErrorKind::NotFound {
                    warn!(path = %temp_path.display(), error = %e, "Failed to clean up temp file");
                }
            }
        }
        result?;

        info!(
            date = %table.date,
            stations = table.len(),
            path = %final_path.display(),
            "Persisted day file"
        );

        Ok(WriteOutcome::Written)
    }

    /// Read one day back from the store.
    pub fn read_day(&self, date: NaiveDate) -> Result<DayTable, PrecipError> {
        let path = self.day_path(date);
        let file = fs::File::open(&path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                PrecipError::DataNotAvailable(date.to_string())
            } else {
                PrecipError::StorageError(format!("failed to open {}: {}", path.display(), e))
            }
        })?;
        day_file::read_day_csv(file, date)
    }

    /// Read every day in the store, oldest first.
    pub fn read_all(&self) -> Result<Vec<DayTable>, PrecipError> {
        let mut tables = Vec::new();
        for date in self.dates()? {
            tables.push(self.read_day(date)?);
        }
        Ok(tables)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use precip_common::{StationDayRow, HOURS_PER_DAY};
    use tempfile::TempDir;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn table(d: &str, amount: f64) -> DayTable {
        let mut hourly = vec![None; HOURS_PER_DAY];
        hourly[11] = Some(amount);
        DayTable::new(date(d), vec![StationDayRow::new("Praha-Ruzyne", hourly)])
    }

    #[test]
    fn test_write_then_list_and_read() {
        let dir = TempDir::new().unwrap();
        let store = DailyStore::open(dir.path()).unwrap();

        let day = table("2024-05-02", 3.5);
        assert_eq!(store.write_day(&day).unwrap(), WriteOutcome::Written);

        assert_eq!(store.dates().unwrap(), vec![date("2024-05-02")]);
        assert!(store.contains(date("2024-05-02")));
        assert_eq!(store.read_day(date("2024-05-02")).unwrap(), day);
    }

    #[test]
    fn test_existing_date_is_never_rewritten() {
        let dir = TempDir::new().unwrap();
        let store = DailyStore::open(dir.path()).unwrap();

        let original = table("2024-05-02", 3.5);
        store.write_day(&original).unwrap();
        let bytes_before = fs::read(store.root().join("2024-05-02.csv")).unwrap();

        let replacement = table("2024-05-02", 99.0);
        assert_eq!(
            store.write_day(&replacement).unwrap(),
            WriteOutcome::SkippedExisting
        );

        let bytes_after = fs::read(store.root().join("2024-05-02.csv")).unwrap();
        assert_eq!(bytes_before, bytes_after);
        assert_eq!(store.read_day(date("2024-05-02")).unwrap(), original);
    }

    #[test]
    fn test_dates_ignores_foreign_files() {
        let dir = TempDir::new().unwrap();
        let store = DailyStore::open(dir.path()).unwrap();

        fs::write(dir.path().join("README.txt"), "not a day file").unwrap();
        fs::write(dir.path().join("2024-13-99.csv"), "bad date").unwrap();
        store.write_day(&table("2024-05-01", 1.0)).unwrap();

        assert_eq!(store.dates().unwrap(), vec![date("2024-05-01")]);
    }

    #[test]
    fn test_no_partial_file_left_behind() {
        let dir = TempDir::new().unwrap();
        let store = DailyStore::open(dir.path()).unwrap();
        store.write_day(&table("2024-05-01", 1.0)).unwrap();

        let leftovers: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_string_lossy().ends_with(".partial"))
            .collect();
        assert!(leftovers.is_empty());
    }
}
