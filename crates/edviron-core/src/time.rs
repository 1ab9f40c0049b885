//! Date ranges and month labels used by the analytics views

use chrono::{Datelike, Months, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

pub const MONTH_NAMES: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Inclusive date range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// First day of the month eleven months back through `today`, so each
    /// month name occurs once in the range
    pub fn last_twelve_months(today: NaiveDate) -> Self {
        let start = today
            .with_day(1)
            .and_then(|first| first.checked_sub_months(Months::new(11)))
            .unwrap_or(today);
        Self { start, end: today }
    }

    pub fn contains(&self, date: &NaiveDate) -> bool {
        *date >= self.start && *date <= self.end
    }

    pub fn description(&self) -> String {
        format!("{} to {}", self.start, self.end)
    }
}

/// Today's date in UTC
pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

/// Twelve month names starting at the month of `today`
/// (April gives `Apr, May, ..., Feb, Mar`)
pub fn rolling_month_labels(today: NaiveDate) -> Vec<&'static str> {
    let current = today.month0() as usize;
    MONTH_NAMES[current..]
        .iter()
        .chain(MONTH_NAMES[..current].iter())
        .copied()
        .collect()
}

/// Short month name of a date
pub fn month_name(date: &NaiveDate) -> &'static str {
    MONTH_NAMES[date.month0() as usize]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rolling_month_labels() {
        let april = NaiveDate::from_ymd_opt(2025, 4, 17).unwrap();
        let labels = rolling_month_labels(april);
        assert_eq!(labels.len(), 12);
        assert_eq!(labels[0], "Apr");
        assert_eq!(labels[11], "Mar");

        let january = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        assert_eq!(rolling_month_labels(january), MONTH_NAMES.to_vec());
    }

    #[test]
    fn test_last_twelve_months() {
        let today = NaiveDate::from_ymd_opt(2025, 4, 17).unwrap();
        let range = DateRange::last_twelve_months(today);
        assert_eq!(range.start, NaiveDate::from_ymd_opt(2024, 5, 1).unwrap());
        assert!(range.contains(&today));
        assert!(!range.contains(&NaiveDate::from_ymd_opt(2024, 4, 30).unwrap()));

        let leap = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
        assert_eq!(
            DateRange::last_twelve_months(leap).start,
            NaiveDate::from_ymd_opt(2023, 3, 1).unwrap()
        );
    }

    #[test]
    fn test_month_name() {
        assert_eq!(month_name(&NaiveDate::from_ymd_opt(2025, 12, 5).unwrap()), "Dec");
    }
}
