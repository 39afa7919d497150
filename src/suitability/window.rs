//! Trailing date window the climate statistics are computed over

use chrono::{DateTime, Datelike, Days, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Inclusive date range handed to the climate provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl AnalysisWindow {
    /// Window ending `recency_offset_days` before `now` and spanning `span_years`.
    ///
    /// The end date skips the most recent days, which climate archives
    /// typically have not published yet. Subtracting whole years from
    /// Feb 29 rolls over to Mar 1 when the target year has no leap day.
    #[must_use]
    pub fn trailing(now: DateTime<Utc>, recency_offset_days: u32, span_years: u32) -> Self {
        let today = now.date_naive();
        let end = today
            .checked_sub_days(Days::new(u64::from(recency_offset_days)))
            .unwrap_or(NaiveDate::MIN);

        Self {
            start: years_before(end, span_years),
            end,
        }
    }

    /// Start date as `YYYYMMDD`
    #[must_use]
    pub fn start_compact(&self) -> String {
        self.start.format("%Y%m%d").to_string()
    }

    /// End date as `YYYYMMDD`
    #[must_use]
    pub fn end_compact(&self) -> String {
        self.end.format("%Y%m%d").to_string()
    }

    #[must_use]
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }
}

fn years_before(date: NaiveDate, years: u32) -> NaiveDate {
    let year = date
        .year()
        .saturating_sub(i32::try_from(years).unwrap_or(i32::MAX));

    date.with_year(year)
        .or_else(|| NaiveDate::from_ymd_opt(year, 3, 1))
        .unwrap_or(NaiveDate::MIN)
}

impl fmt::Display for AnalysisWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} to {}", self.start, self.end)
    }
}
