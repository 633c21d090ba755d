// ABOUTME: Inclusive calendar date range used for per-day metric fetching
// ABOUTME: Parses ISO dates and yields every date from start to end
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::errors::{AppError, AppResult};
use chrono::{Days, NaiveDate};

/// ISO-8601 calendar date format accepted on the wire
pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

/// Ordered, inclusive range of calendar dates with `start <= end`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    /// Build a range, rejecting `start > end`
    ///
    /// # Errors
    ///
    /// Returns `INVALID_INPUT` if `start` is after `end`
    pub fn new(start: NaiveDate, end: NaiveDate) -> AppResult<Self> {
        if start > end {
            return Err(AppError::invalid_input(format!(
                "start_date {start} is after end_date {end}"
            )));
        }
        Ok(Self { start, end })
    }

    /// Parse both bounds from `YYYY-MM-DD` strings
    ///
    /// # Errors
    ///
    /// Returns `INVALID_FORMAT` for unparsable dates and `INVALID_INPUT` for a reversed range
    pub fn parse(start: &str, end: &str) -> AppResult<Self> {
        Self::new(parse_iso_date("start_date", start)?, parse_iso_date("end_date", end)?)
    }

    /// First date of the range
    #[must_use]
    pub const fn start(&self) -> NaiveDate {
        self.start
    }

    /// Last date of the range
    #[must_use]
    pub const fn end(&self) -> NaiveDate {
        self.end
    }

    /// Number of dates in the range, always at least one
    #[must_use]
    pub fn len(&self) -> usize {
        // start <= end is enforced at construction
        (self.end - self.start).num_days().unsigned_abs() as usize + 1
    }

    /// A range always holds at least one date
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        false
    }

    /// Every date from start to end inclusive, in order
    #[must_use]
    pub fn dates(&self) -> Vec<NaiveDate> {
        let end = self.end;
        std::iter::successors(Some(self.start), |date| date.checked_add_days(Days::new(1)))
            .take_while(|date| *date <= end)
            .collect()
    }
}

/// Parse a single `YYYY-MM-DD` date
///
/// # Errors
///
/// Returns `INVALID_FORMAT` naming the offending field
pub fn parse_iso_date(field: &str, value: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), ISO_DATE_FORMAT).map_err(|e| {
        AppError::invalid_format(format!("{field} must be an ISO date (YYYY-MM-DD): {e}"))
    })
}

/// Format a date as `YYYY-MM-DD`
#[must_use]
pub fn format_iso_date(date: NaiveDate) -> String {
    date.format(ISO_DATE_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorCode;

    #[test]
    fn test_range_is_inclusive() -> AppResult<()> {
        let range = DateRange::parse("2024-01-01", "2024-01-03")?;
        let dates: Vec<String> = range.dates().into_iter().map(format_iso_date).collect();
        assert_eq!(dates, vec!["2024-01-01", "2024-01-02", "2024-01-03"]);
        assert_eq!(range.len(), 3);
        Ok(())
    }

    #[test]
    fn test_single_day_range() -> AppResult<()> {
        let range = DateRange::parse("2024-02-29", "2024-02-29")?;
        assert_eq!(range.len(), 1);
        assert_eq!(range.dates().len(), 1);
        Ok(())
    }

    #[test]
    fn test_range_crosses_month_boundary() -> AppResult<()> {
        let range = DateRange::parse("2023-12-30", "2024-01-02")?;
        assert_eq!(range.len(), 4);
        assert_eq!(range.dates().last().copied(), Some(range.end()));
        Ok(())
    }

    #[test]
    fn test_reversed_range_is_rejected() {
        let err = DateRange::parse("2024-01-05", "2024-01-01").err();
        assert_eq!(err.map(|e| e.code), Some(ErrorCode::InvalidInput));
    }

    #[test]
    fn test_invalid_date_is_rejected() {
        let err = DateRange::parse("2024-02-30", "2024-03-01").err();
        assert_eq!(err.map(|e| e.code), Some(ErrorCode::InvalidFormat));
    }
}
