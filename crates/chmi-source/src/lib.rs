//! Client for the CHMI precipitation pages.
//!
//! The Czech Hydrometeorological Institute publishes hourly precipitation
//! per station as paginated HTML tables, addressed by a day offset
//! (0 = today .. 7 = oldest kept). This crate fetches and parses one day
//! of those pages into a [`DayTable`].

pub mod client;
pub mod html;

use async_trait::async_trait;
use chrono::NaiveDate;

use precip_common::{DayTable, PrecipError};

pub use client::{HppsClient, HppsConfig};

/// Maximum day offset the source keeps pages for.
pub const MAX_DAY_OFFSET: u32 = 7;

/// A source of one-day precipitation tables.
///
/// The HTTP implementation is [`HppsClient`]; tests substitute fakes.
#[async_trait]
pub trait PrecipSource: Send + Sync {
    /// Fetch the complete table for a day offset (0 = today).
    async fn fetch_day(&self, offset: u32) -> Result<DayTable, PrecipError>;
}

/// Fetch the table for a specific calendar date.
///
/// Translates the date to a day offset relative to `today`, rejects dates
/// outside the window the source keeps, and verifies that the measurement
/// date the source reports matches the request. Today's data is incomplete
/// until the day ends, so offset 0 is only allowed with `allow_today`.
pub async fn fetch_date(
    source: &dyn PrecipSource,
    date: NaiveDate,
    today: NaiveDate,
    allow_today: bool,
) -> Result<DayTable, PrecipError> {
    let offset = (today - date).num_days();
    let min_offset: u32 = if allow_today { 0 } else { 1 };

    if offset < min_offset as i64 || offset > MAX_DAY_OFFSET as i64 {
        return Err(PrecipError::OffsetOutOfRange {
            offset,
            min: min_offset,
            max: MAX_DAY_OFFSET,
        });
    }

    let table = source.fetch_day(offset as u32).await?;

    if table.date != date {
        return Err(PrecipError::SourceDateMismatch {
            requested: date.to_string(),
            reported: table.date.to_string(),
        });
    }

    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use precip_common::{StationDayRow, HOURS_PER_DAY};

    struct FixedSource {
        date: NaiveDate,
    }

    #[async_trait]
    impl PrecipSource for FixedSource {
        async fn fetch_day(&self, _offset: u32) -> Result<DayTable, PrecipError> {
            Ok(DayTable::new(
                self.date,
                vec![StationDayRow::new("Praha", vec![Some(1.0); HOURS_PER_DAY])],
            ))
        }
    }

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[tokio::test]
    async fn test_fetch_date_happy_path() {
        let source = FixedSource {
            date: date("2024-05-02"),
        };
        let table = fetch_date(&source, date("2024-05-02"), date("2024-05-03"), false)
            .await
            .unwrap();
        assert_eq!(table.date, date("2024-05-02"));
        assert_eq!(table.len(), 1);
    }

    #[tokio::test]
    async fn test_fetch_date_rejects_today_by_default() {
        let source = FixedSource {
            date: date("2024-05-03"),
        };
        let err = fetch_date(&source, date("2024-05-03"), date("2024-05-03"), false)
            .await
            .unwrap_err();
        assert!(matches!(err, PrecipError::OffsetOutOfRange { offset: 0, .. }));
    }

    #[tokio::test]
    async fn test_fetch_date_allows_today_when_asked() {
        let source = FixedSource {
            date: date("2024-05-03"),
        };
        assert!(
            fetch_date(&source, date("2024-05-03"), date("2024-05-03"), true)
                .await
                .is_ok()
        );
    }

    #[tokio::test]
    async fn test_fetch_date_rejects_too_old() {
        let source = FixedSource {
            date: date("2024-04-01"),
        };
        let err = fetch_date(&source, date("2024-04-01"), date("2024-05-03"), false)
            .await
            .unwrap_err();
        assert!(matches!(err, PrecipError::OffsetOutOfRange { .. }));
    }

    #[tokio::test]
    async fn test_fetch_date_detects_mismatched_report() {
        let source = FixedSource {
            date: date("2024-05-01"),
        };
        let err = fetch_date(&source, date("2024-05-02"), date("2024-05-03"), false)
            .await
            .unwrap_err();
        assert!(matches!(err, PrecipError::SourceDateMismatch { .. }));
    }
}
