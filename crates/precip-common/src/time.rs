//! Date handling for precipitation data.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::PrecipError;

/// Parse a date in ISO (`2023-10-02`) or Czech (`2.10.2023`) format.
///
/// The precipitation pages report dates in `d.m.yyyy`; everything else in
/// the system speaks ISO.
pub fn parse_date(s: &str) -> Result<NaiveDate, PrecipError> {
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Ok(date);
    }

    NaiveDate::parse_from_str(s, "%d.%m.%Y")
        .map_err(|_| PrecipError::InvalidDate(s.to_string()))
}

/// An inclusive date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// Create a range, rejecting `end < start`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, PrecipError> {
        if end < start {
            return Err(PrecipError::InvalidRange(format!(
                "end {} before start {}",
                end, start
            )));
        }
        Ok(Self { start, end })
    }

    /// Clamp this range to the given bounds.
    ///
    /// Returns `None` when the ranges do not overlap at all.
    pub fn clamp_to(&self, bounds: &DateRange) -> Option<DateRange> {
        let start = self.start.max(bounds.start);
        let end = self.end.min(bounds.end);
        (start <= end).then_some(DateRange { start, end })
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// Number of days in the range, endpoints included.
    pub fn num_days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }

    /// Iterate the days of the range in order.
    pub fn iter_days(&self) -> impl Iterator<Item = NaiveDate> {
        let end = self.end;
        self.start.iter_days().take_while(move |d| *d <= end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_parse_iso_date() {
        assert_eq!(parse_date("2023-10-02").unwrap(), date("2023-10-02"));
    }

    #[test]
    fn test_parse_czech_date() {
        assert_eq!(parse_date("2.10.2023").unwrap(), date("2023-10-02"));
        assert_eq!(parse_date("15.11.2024").unwrap(), date("2024-11-15"));
    }

    #[test]
    fn test_parse_invalid_date() {
        assert!(parse_date("32.10.2023").is_err());
        assert!(parse_date("not a date").is_err());
    }

    #[test]
    fn test_range_rejects_inverted() {
        assert!(DateRange::new(date("2024-04-07"), date("2024-04-01")).is_err());
    }

    #[test]
    fn test_range_clamp() {
        let bounds = DateRange::new(date("2024-01-01"), date("2024-12-31")).unwrap();
        let range = DateRange::new(date("2023-06-01"), date("2024-03-01")).unwrap();

        let clamped = range.clamp_to(&bounds).unwrap();
        assert_eq!(clamped.start, date("2024-01-01"));
        assert_eq!(clamped.end, date("2024-03-01"));
    }

    #[test]
    fn test_range_clamp_disjoint() {
        let bounds = DateRange::new(date("2024-01-01"), date("2024-12-31")).unwrap();
        let range = DateRange::new(date("2023-01-01"), date("2023-06-01")).unwrap();
        assert!(range.clamp_to(&bounds).is_none());
    }

    #[test]
    fn test_range_days() {
        let range = DateRange::new(date("2024-04-01"), date("2024-04-07")).unwrap();
        assert_eq!(range.num_days(), 7);
        let days: Vec<_> = range.iter_days().collect();
        assert_eq!(days.len(), 7);
        assert_eq!(days[0], date("2024-04-01"));
        assert_eq!(days[6], date("2024-04-07"));
    }
}
