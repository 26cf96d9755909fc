//! Contains [`DateWindow`], the fixed grid of calendar dates forecasts are bucketed onto.

use chrono::{Days, Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// An ordered run of `days` consecutive calendar dates starting at `start`.
///
/// The window defines the columns of the forecast matrix: every
/// [`crate::LocationForecast`] has exactly one entry per date in the window,
/// in window order.
///
/// # Examples
///
/// ```
/// use weather_matrix::DateWindow;
/// use chrono::NaiveDate;
///
/// let start = NaiveDate::from_ymd_opt(2024, 10, 15).unwrap();
/// let window = DateWindow::new(start, 11);
///
/// assert_eq!(window.len(), 11);
/// assert_eq!(window.index_of(NaiveDate::from_ymd_opt(2024, 10, 25).unwrap()), Some(10));
/// assert_eq!(window.index_of(NaiveDate::from_ymd_opt(2024, 10, 26).unwrap()), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateWindow {
    start: NaiveDate,
    days: usize,
}

impl DateWindow {
    pub fn new(start: NaiveDate, days: usize) -> Self {
        Self { start, days }
    }

    /// A window of `days` dates starting today, in the local timezone.
    pub fn starting_today(days: usize) -> Self {
        Self::new(Local::now().date_naive(), days)
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn len(&self) -> usize {
        self.days
    }

    pub fn is_empty(&self) -> bool {
        self.days == 0
    }

    /// Iterates the window's dates in order.
    ///
    /// Dates that would overflow the calendar are not produced.
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        (0..self.days).map_while(move |offset| self.start.checked_add_days(Days::new(offset as u64)))
    }

    /// Position of `date` within the window, if it falls inside it.
    pub fn index_of(&self, date: NaiveDate) -> Option<usize> {
        let offset = date.signed_duration_since(self.start).num_days();
        usize::try_from(offset).ok().filter(|&i| i < self.days)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.index_of(date).is_some()
    }
}

impl fmt::Display for DateWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.dates().last() {
            Some(end) => write!(f, "{} to {}", self.start, end),
            None => write!(f, "empty window at {}", self.start),
        }
    }
}
