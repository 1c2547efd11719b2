//! Month grids for the maintenance calendar.
//!
//! A grid starts on Sunday: the first day of the month is preceded by one
//! blank cell per weekday before it.

use std::{fmt, str::FromStr};

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::domain::{MaintenanceRequest, Store};

/// A calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct YearMonth {
    /// Always the first day of the month.
    first: NaiveDate,
}

impl YearMonth {
    /// Creates a month.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::InvalidMonth`] if `month` is not in 1–12 or
    /// the year is out of range.
    pub fn new(year: i32, month: u32) -> Result<Self, CalendarError> {
        NaiveDate::from_ymd_opt(year, month, 1)
            .map(|first| Self { first })
            .ok_or(CalendarError::InvalidMonth { year, month })
    }

    /// The month containing `date`.
    #[must_use]
    pub fn containing(date: NaiveDate) -> Self {
        Self {
            first: date.with_day(1).unwrap_or(date),
        }
    }

    /// The year.
    #[must_use]
    pub fn year(self) -> i32 {
        self.first.year()
    }

    /// The month number, 1–12.
    #[must_use]
    pub fn month(self) -> u32 {
        self.first.month()
    }

    /// The first day of the month.
    #[must_use]
    pub const fn first_day(self) -> NaiveDate {
        self.first
    }

    /// Every day of the month, in order.
    pub fn days(self) -> impl Iterator<Item = NaiveDate> {
        let month = self.month();
        self.first
            .iter_days()
            .take_while(move |day| day.month() == month)
    }

    /// The following month.
    #[must_use]
    pub fn next(self) -> Self {
        self.days()
            .last()
            .and_then(|last| last.succ_opt())
            .map_or(self, Self::containing)
    }

    /// The preceding month.
    #[must_use]
    pub fn previous(self) -> Self {
        self.first.pred_opt().map_or(self, Self::containing)
    }

    /// The month name, e.g. "October".
    #[must_use]
    pub fn month_name(self) -> String {
        self.first.format("%B").to_string()
    }
}

/// October 2025, the month the dashboard's calendar opens on.
impl Default for YearMonth {
    fn default() -> Self {
        Self {
            first: NaiveDate::from_ymd_opt(2025, 10, 1).unwrap_or_default(),
        }
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year(), self.month())
    }
}

impl FromStr for YearMonth {
    type Err = CalendarError;

    /// Parses `YYYY-MM`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || CalendarError::InvalidFormat(s.to_string());
        let (year, month) = s.trim().split_once('-').ok_or_else(invalid)?;
        let year = year.parse().map_err(|_| invalid())?;
        let month = month.parse().map_err(|_| invalid())?;
        Self::new(year, month)
    }
}

impl TryFrom<String> for YearMonth {
    type Error = CalendarError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<YearMonth> for String {
    fn from(month: YearMonth) -> Self {
        month.to_string()
    }
}

/// Errors that can occur when naming a calendar month.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CalendarError {
    /// The month number or year is out of range.
    #[error("invalid month {year:04}-{month:02}")]
    InvalidMonth {
        /// The requested year.
        year: i32,
        /// The requested month number.
        month: u32,
    },
    /// The text is not of the form `YYYY-MM`.
    #[error("invalid month '{0}': expected YYYY-MM")]
    InvalidFormat(String),
}

/// A cell of the month grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CalendarCell<'a> {
    /// Padding before the first day of the month.
    Blank,
    /// A day of the month with the requests assigned to it.
    Day {
        /// The date.
        date: NaiveDate,
        /// Requests whose assigned date is this day, in listing order.
        requests: Vec<&'a MaintenanceRequest>,
    },
}

impl CalendarCell<'_> {
    /// The day of the month, or `None` for padding.
    #[must_use]
    pub fn day(&self) -> Option<u32> {
        match self {
            Self::Blank => None,
            Self::Day { date, .. } => Some(date.day()),
        }
    }
}

/// Builds the grid for `month`: leading blanks, then one cell per day.
#[must_use]
pub fn month_grid(store: &Store, month: YearMonth) -> Vec<CalendarCell<'_>> {
    let first = month.first_day();
    let last = month.days().last().unwrap_or(first);
    let leading = first.weekday().num_days_from_sunday();
    let mut buckets = store.calendar_buckets(first..=last);

    (0..leading)
        .map(|_| CalendarCell::Blank)
        .chain(month.days().map(|date| CalendarCell::Day {
            date,
            requests: buckets.remove(&date).unwrap_or_default(),
        }))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn october() -> YearMonth {
        YearMonth::new(2025, 10).unwrap()
    }

    #[test]
    fn october_2025_starts_on_wednesday() {
        let store = Store::seeded();
        let grid = month_grid(&store, october());

        let blanks = grid
            .iter()
            .take_while(|cell| matches!(cell, CalendarCell::Blank))
            .count();
        assert_eq!(blanks, 3);
        assert_eq!(grid.len(), 3 + 31);
        assert_eq!(grid[3].day(), Some(1));
        assert_eq!(grid.last().and_then(CalendarCell::day), Some(31));
    }

    #[test]
    fn requests_land_on_their_day() {
        let store = Store::seeded();
        let grid = month_grid(&store, october());

        let CalendarCell::Day { requests, .. } = &grid[3 + 11] else {
            panic!("expected a day cell");
        };
        let subjects: Vec<_> = requests.iter().map(|r| r.subject.as_str()).collect();
        assert_eq!(subjects, vec!["A/C Unit Failure Room 402"]);

        let busy_days: Vec<_> = grid
            .iter()
            .filter_map(|cell| match cell {
                CalendarCell::Day { date, requests } if !requests.is_empty() => Some(date.day()),
                _ => None,
            })
            .collect();
        assert_eq!(busy_days, vec![12, 15, 18]);
    }

    #[test]
    fn month_navigation_wraps_years() {
        let december = YearMonth::new(2025, 12).unwrap();
        assert_eq!(december.next(), YearMonth::new(2026, 1).unwrap());
        assert_eq!(december.next().previous(), december);
        assert_eq!(december.days().count(), 31);
        assert_eq!(YearMonth::new(2024, 2).unwrap().days().count(), 29);
    }

    #[test]
    fn parses_year_month() {
        assert_eq!("2025-10".parse(), Ok(october()));
        assert_eq!(october().to_string(), "2025-10");
        assert_eq!(october().month_name(), "October");
        assert_eq!(
            "2025-13".parse::<YearMonth>(),
            Err(CalendarError::InvalidMonth {
                year: 2025,
                month: 13
            })
        );
        assert!(matches!(
            "October".parse::<YearMonth>(),
            Err(CalendarError::InvalidFormat(_))
        ));
    }
}
