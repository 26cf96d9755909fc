//! Bucketed forecast types: the per-slot values, one day's pair of slots, a
//! location's full row across the date window, and the ranking derived from it.

use crate::forecast_data::ranker::rank;
use crate::types::date_window::DateWindow;
use crate::types::location::Location;
use crate::types::slot::Slot;
use chrono::NaiveDate;
use serde::Serialize;

/// The representative reading for one (date, slot) cell.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DaySlotValue {
    /// Temperature in the configured unit system, rounded to one decimal.
    pub temperature: f64,
    /// Probability of precipitation as a whole percentage, `0..=100`.
    pub rain_chance: u8,
}

/// Morning and afternoon readings for a single calendar date.
///
/// Either slot is `None` when the provider reported no sample for it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayForecast {
    pub date: NaiveDate,
    pub morning: Option<DaySlotValue>,
    pub afternoon: Option<DaySlotValue>,
}

impl DayForecast {
    /// A day with both slots absent.
    pub fn empty(date: NaiveDate) -> Self {
        Self {
            date,
            morning: None,
            afternoon: None,
        }
    }

    pub fn slot(&self, slot: Slot) -> Option<&DaySlotValue> {
        match slot {
            Slot::Morning => self.morning.as_ref(),
            Slot::Afternoon => self.afternoon.as_ref(),
        }
    }

    pub(crate) fn slot_mut(&mut self, slot: Slot) -> &mut Option<DaySlotValue> {
        match slot {
            Slot::Morning => &mut self.morning,
            Slot::Afternoon => &mut self.afternoon,
        }
    }

    /// True when both morning and afternoon are present.
    pub fn is_complete(&self) -> bool {
        self.morning.is_some() && self.afternoon.is_some()
    }

    /// Mean temperature minus mean rain chance; higher is more pleasant.
    ///
    /// Only defined for complete days.
    ///
    /// # Examples
    ///
    /// ```
    /// use weather_matrix::{DayForecast, DaySlotValue};
    /// use chrono::NaiveDate;
    ///
    /// let day = DayForecast {
    ///     date: NaiveDate::from_ymd_opt(2024, 10, 15).unwrap(),
    ///     morning: Some(DaySlotValue { temperature: 12.0, rain_chance: 10 }),
    ///     afternoon: Some(DaySlotValue { temperature: 18.0, rain_chance: 50 }),
    /// };
    /// assert_eq!(day.comfort_score(), Some(-15.0));
    /// ```
    pub fn comfort_score(&self) -> Option<f64> {
        let (morning, afternoon) = (self.morning?, self.afternoon?);
        let temperature = (morning.temperature + afternoon.temperature) / 2.0;
        let rain = (f64::from(morning.rain_chance) + f64::from(afternoon.rain_chance)) / 2.0;
        Some(temperature - rain)
    }
}

/// One location's forecast row: exactly one [`DayForecast`] per date of the
/// [`DateWindow`] it was built for, in window order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct LocationForecast {
    days: Vec<DayForecast>,
}

impl LocationForecast {
    /// The all-absent row for `window`; used whenever no data could be obtained.
    pub fn empty(window: &DateWindow) -> Self {
        Self {
            days: window.dates().map(DayForecast::empty).collect(),
        }
    }

    pub fn days(&self) -> &[DayForecast] {
        &self.days
    }

    pub fn get(&self, index: usize) -> Option<&DayForecast> {
        self.days.get(index)
    }

    pub(crate) fn get_mut(&mut self, index: usize) -> Option<&mut DayForecast> {
        self.days.get_mut(index)
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DayForecast> {
        self.days.iter()
    }

    /// True when no slot on any day holds a value.
    pub fn is_blank(&self) -> bool {
        self.days
            .iter()
            .all(|day| day.morning.is_none() && day.afternoon.is_none())
    }

    /// Best and worst day of this row, see [`crate::rank`].
    pub fn rank(&self) -> Ranking {
        rank(self)
    }
}

impl<'a> IntoIterator for &'a LocationForecast {
    type Item = &'a DayForecast;
    type IntoIter = std::slice::Iter<'a, DayForecast>;

    fn into_iter(self) -> Self::IntoIter {
        self.days.iter()
    }
}

/// Indices of the most and least pleasant complete days of a [`LocationForecast`].
///
/// Both are `None` when the row holds no complete day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Ranking {
    pub best_day: Option<usize>,
    pub worst_day: Option<usize>,
}

/// Everything a renderer needs for one row of the matrix.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LocationReport {
    pub location: Location,
    pub forecast: LocationForecast,
    pub ranking: Ranking,
}
