//! # Period Filter
//!
//! One filter shared by every report and dashboard figure.
//!
//! ## Buckets
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  reference day: Thu 20/06/2024                                          │
//! │                                                                         │
//! │  Day      20/06/2024                                                    │
//! │  Week     Sun 16/06/2024 ──────────────► Sat 22/06/2024  (inclusive)    │
//! │  Month    06/2024                                                       │
//! │  Quarter  04/2024 ─► 06/2024  (q = month0 / 3, months 3q..=3q+2)        │
//! │  None     everything, including unparseable dates                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Weeks start on Sunday. Records whose date does not parse are dropped by
//! every bucket; they never cause an error.

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::types::{Expense, Sale};
use crate::DATE_FORMAT;

// =============================================================================
// Filter Period
// =============================================================================

/// Report period, relative to a reference day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum FilterPeriod {
    Day,
    Week,
    Month,
    Quarter,
}

impl FilterPeriod {
    /// All periods, in the order the UI offers them.
    pub const ALL: [FilterPeriod; 4] = [
        FilterPeriod::Day,
        FilterPeriod::Week,
        FilterPeriod::Month,
        FilterPeriod::Quarter,
    ];

    /// Parses a period name.
    ///
    /// Unknown text yields `None`, which [`filter_by_period`] treats as
    /// "keep everything".
    ///
    /// ## Example
    /// ```rust
    /// use boutique_core::period::FilterPeriod;
    ///
    /// assert_eq!(FilterPeriod::parse_lenient("Week"), Some(FilterPeriod::Week));
    /// assert_eq!(FilterPeriod::parse_lenient("year"), None);
    /// ```
    pub fn parse_lenient(value: &str) -> Option<FilterPeriod> {
        match value.trim().to_ascii_lowercase().as_str() {
            "day" => Some(FilterPeriod::Day),
            "week" => Some(FilterPeriod::Week),
            "month" => Some(FilterPeriod::Month),
            "quarter" => Some(FilterPeriod::Quarter),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FilterPeriod::Day => "day",
            FilterPeriod::Week => "week",
            FilterPeriod::Month => "month",
            FilterPeriod::Quarter => "quarter",
        }
    }

    /// Whether `date` falls in this period relative to `today`.
    pub fn contains(&self, date: NaiveDate, today: NaiveDate) -> bool {
        match self {
            FilterPeriod::Day => date == today,
            FilterPeriod::Week => {
                let (start, end) = week_bounds(today);
                date >= start && date <= end
            }
            FilterPeriod::Month => date.month() == today.month() && date.year() == today.year(),
            FilterPeriod::Quarter => {
                let start = quarter_index(today) * 3;
                let month0 = date.month0();
                date.year() == today.year() && month0 >= start && month0 <= start + 2
            }
        }
    }
}

/// Sunday-to-Saturday week containing `today`.
pub fn week_bounds(today: NaiveDate) -> (NaiveDate, NaiveDate) {
    let offset = today.weekday().num_days_from_sunday() as i64;
    let start = today - Duration::days(offset);
    (start, start + Duration::days(6))
}

/// Zero-based quarter of the year (0..=3).
pub fn quarter_index(day: NaiveDate) -> u32 {
    day.month0() / 3
}

// =============================================================================
// Dated Records
// =============================================================================

/// A record carrying a `DD/MM/YYYY` date.
pub trait Dated {
    fn date_text(&self) -> &str;

    /// Parsed calendar date, `None` when malformed.
    fn calendar_date(&self) -> Option<NaiveDate> {
        parse_date(self.date_text())
    }
}

impl Dated for Sale {
    fn date_text(&self) -> &str {
        &self.date
    }
}

impl Dated for Expense {
    fn date_text(&self) -> &str {
        &self.date
    }
}

impl<T: Dated + ?Sized> Dated for &T {
    fn date_text(&self) -> &str {
        (**self).date_text()
    }
}

/// Parses a `DD/MM/YYYY` date.
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(text.trim(), DATE_FORMAT).ok()
}

/// Formats a date the way records store it.
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

// =============================================================================
// Filter
// =============================================================================

/// Keeps the records that fall in `period` relative to `today`.
///
/// Output borrows from `records` and keeps their relative order. A `None`
/// period keeps every record.
pub fn filter_by_period<T: Dated>(
    records: &[T],
    period: Option<FilterPeriod>,
    today: NaiveDate,
) -> Vec<&T> {
    let Some(period) = period else {
        return records.iter().collect();
    };

    let kept: Vec<&T> = records
        .iter()
        .filter(|record| match record.calendar_date() {
            Some(date) => period.contains(date, today),
            None => {
                tracing::warn!(date = record.date_text(), "Skipping record with unparseable date");
                false
            }
        })
        .collect();

    tracing::debug!(
        period = period.as_str(),
        total = records.len(),
        kept = kept.len(),
        "Filtered records by period"
    );

    kept
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn expense(id: &str, date: &str) -> Expense {
        Expense {
            id: id.to_string(),
            description: "Loyer".to_string(),
            category: "Local".to_string(),
            amount: 100,
            date: date.to_string(),
        }
    }

    fn ids(records: &[&Expense]) -> Vec<String> {
        records.iter().map(|e| e.id.clone()).collect()
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(parse_date("01/06/2024"), Some(ymd(2024, 6, 1)));
        assert_eq!(parse_date(" 15/06/2024 "), Some(ymd(2024, 6, 15)));
        assert_eq!(parse_date("2024-06-01"), None);
        assert_eq!(parse_date("31/02/2024"), None);
        assert_eq!(parse_date(""), None);
    }

    #[test]
    fn test_day_includes_reference_day_only() {
        let records = vec![expense("a", "20/06/2024"), expense("b", "19/06/2024")];
        let kept = filter_by_period(&records, Some(FilterPeriod::Day), ymd(2024, 6, 20));
        assert_eq!(ids(&kept), vec!["a"]);
    }

    #[test]
    fn test_week_starts_on_sunday() {
        // Thursday 20/06/2024 -> Sunday 16/06 .. Saturday 22/06
        assert_eq!(week_bounds(ymd(2024, 6, 20)), (ymd(2024, 6, 16), ymd(2024, 6, 22)));
        // A Sunday is the first day of its own week
        assert_eq!(week_bounds(ymd(2024, 6, 16)).0, ymd(2024, 6, 16));

        let records = vec![
            expense("sat-before", "15/06/2024"),
            expense("sun", "16/06/2024"),
            expense("sat", "22/06/2024"),
            expense("sun-after", "23/06/2024"),
        ];
        let kept = filter_by_period(&records, Some(FilterPeriod::Week), ymd(2024, 6, 20));
        assert_eq!(ids(&kept), vec!["sun", "sat"]);
    }

    #[test]
    fn test_week_crosses_year_boundary() {
        // Wednesday 01/01/2025 -> Sunday 29/12/2024
        let records = vec![expense("dec", "29/12/2024"), expense("jan", "04/01/2025")];
        let kept = filter_by_period(&records, Some(FilterPeriod::Week), ymd(2025, 1, 1));
        assert_eq!(ids(&kept), vec!["dec", "jan"]);
    }

    #[test]
    fn test_month_requires_same_year() {
        let records = vec![
            expense("june", "01/06/2024"),
            expense("june-last-year", "01/06/2023"),
            expense("july", "01/07/2024"),
        ];
        let kept = filter_by_period(&records, Some(FilterPeriod::Month), ymd(2024, 6, 20));
        assert_eq!(ids(&kept), vec!["june"]);
    }

    #[test]
    fn test_quarter_span() {
        let records = vec![
            expense("mar", "31/03/2024"),
            expense("apr", "01/04/2024"),
            expense("jun", "30/06/2024"),
            expense("jul", "01/07/2024"),
        ];
        let kept = filter_by_period(&records, Some(FilterPeriod::Quarter), ymd(2024, 5, 10));
        assert_eq!(ids(&kept), vec!["apr", "jun"]);
        assert_eq!(quarter_index(ymd(2024, 12, 31)), 3);
    }

    #[test]
    fn test_unparseable_dates_are_excluded() {
        let records = vec![expense("bad", "hier"), expense("good", "20/06/2024")];
        for period in FilterPeriod::ALL {
            let kept = filter_by_period(&records, Some(period), ymd(2024, 6, 20));
            assert_eq!(ids(&kept), vec!["good"], "period {:?}", period);
        }
    }

    #[test]
    fn test_unknown_period_keeps_everything_in_order() {
        let records = vec![expense("c", "hier"), expense("a", "01/01/2020"), expense("b", "20/06/2024")];
        let period = FilterPeriod::parse_lenient("decade");
        let kept = filter_by_period(&records, period, ymd(2024, 6, 20));
        assert_eq!(ids(&kept), vec!["c", "a", "b"]);
    }

    #[test]
    fn test_output_is_ordered_subset() {
        let records = vec![
            expense("1", "20/06/2024"),
            expense("2", "01/01/2024"),
            expense("3", "18/06/2024"),
            expense("4", "20/06/2024"),
        ];
        for period in FilterPeriod::ALL {
            let kept = filter_by_period(&records, Some(period), ymd(2024, 6, 20));
            let positions: Vec<usize> = kept
                .iter()
                .map(|k| records.iter().position(|r| r.id == k.id).unwrap())
                .collect();
            assert!(positions.windows(2).all(|w| w[0] < w[1]));
        }
    }

    #[test]
    fn test_period_serde() {
        let json = serde_json::to_string(&FilterPeriod::Quarter).unwrap();
        assert_eq!(json, "\"quarter\"");
        assert_eq!(FilterPeriod::parse_lenient(" MONTH "), Some(FilterPeriod::Month));
    }
}
