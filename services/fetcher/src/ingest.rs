//! One ingestion run: find missing dates, fetch, persist.

use std::collections::HashSet;

use chrono::{Duration, NaiveDate};
use tracing::{info, instrument};

use chmi_source::{fetch_date, PrecipSource};
use precip_common::PrecipError;
use storage::{DailyStore, WriteOutcome};

/// Counters for one ingestion run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    /// Dates fetched and written in this run.
    pub days_written: usize,
    /// Station rows across the written days.
    pub rows_written: usize,
    /// Candidate dates already present in the store.
    pub days_already_present: usize,
}

/// Run one ingestion pass over the offset window `min_offset..=max_offset`
/// (1 = yesterday). Dates already in the store are left untouched; each
/// missing date is fetched and written atomically, oldest first.
///
/// The first failed fetch or write aborts the run; days written before the
/// failure stay, the failed day leaves no trace.
#[instrument(skip(store, source))]
pub async fn run_ingestion(
    store: &DailyStore,
    source: &dyn PrecipSource,
    today: NaiveDate,
    min_offset: u32,
    max_offset: u32,
) -> Result<RunSummary, PrecipError> {
    let existing: HashSet<NaiveDate> = store.dates()?.into_iter().collect();

    let mut candidates: Vec<NaiveDate> = (min_offset..=max_offset)
        .map(|offset| today - Duration::days(offset as i64))
        .collect();
    candidates.sort();

    let mut summary = RunSummary::default();
    let missing: Vec<NaiveDate> = candidates
        .iter()
        .copied()
        .filter(|date| !existing.contains(date))
        .collect();
    summary.days_already_present = candidates.len() - missing.len();

    info!(
        new_dates = missing.len(),
        window = format!("{}-{}", min_offset, max_offset),
        "Computed dates to download"
    );

    for date in missing {
        let table = fetch_date(source, date, today, min_offset == 0).await?;

        match store.write_day(&table)? {
            WriteOutcome::Written => {
                summary.days_written += 1;
                summary.rows_written += table.len();
            }
            // A concurrent run slipped in between the listing and the
            // write; the store kept the earlier file.
            WriteOutcome::SkippedExisting => summary.days_already_present += 1,
        }
    }

    info!(
        days_written = summary.days_written,
        rows_written = summary.rows_written,
        days_already_present = summary.days_already_present,
        "Ingestion run complete"
    );

    Ok(summary)
}
