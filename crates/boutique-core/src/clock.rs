//! Source of the reference day used for period filtering and record dates.

use chrono::{Local, NaiveDate};

use crate::DATE_FORMAT;

/// Clock abstracts access to the current day so reports stay deterministic in tests.
pub trait Clock: Send + Sync {
    /// Today's calendar date in the device's local timezone.
    fn today(&self) -> NaiveDate;

    /// Today formatted as a record date (`DD/MM/YYYY`).
    fn today_label(&self) -> String {
        self.today().format(DATE_FORMAT).to_string()
    }
}

/// Reads the local system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Always returns the same day.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_clock_label() {
        let clock = FixedClock(NaiveDate::from_ymd_opt(2024, 6, 5).unwrap());
        assert_eq!(clock.today_label(), "05/06/2024");
    }
}
