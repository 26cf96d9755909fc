use crate::types::forecast::{LocationForecast, Ranking};

/// Picks the most and least pleasant complete days of `forecast`.
///
/// Each day with both slots present is scored with
/// [`crate::DayForecast::comfort_score`]. Ties go to the earliest day for both
/// the best and the worst pick. When no day is complete, both indices are `None`.
///
/// # Examples
///
/// ```
/// use weather_matrix::{rank, DateWindow, LocationForecast};
/// use chrono::NaiveDate;
///
/// let window = DateWindow::new(NaiveDate::from_ymd_opt(2024, 10, 15).unwrap(), 3);
/// let ranking = rank(&LocationForecast::empty(&window));
/// assert_eq!(ranking.best_day, None);
/// assert_eq!(ranking.worst_day, None);
/// ```
pub fn rank(forecast: &LocationForecast) -> Ranking {
    let mut best: Option<(usize, f64)> = None;
    let mut worst: Option<(usize, f64)> = None;

    let scored = forecast
        .iter()
        .enumerate()
        .filter_map(|(index, day)| day.comfort_score().map(|score| (index, score)));

    for (index, score) in scored {
        // Strict comparisons keep the first occurrence on ties.
        if best.map_or(true, |(_, top)| score > top) {
            best = Some((index, score));
        }
        if worst.map_or(true, |(_, bottom)| score < bottom) {
            worst = Some((index, score));
        }
    }

    Ranking {
        best_day: best.map(|(index, _)| index),
        worst_day: worst.map(|(index, _)| index),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::date_window::DateWindow;
    use crate::types::forecast::DaySlotValue;
    use chrono::NaiveDate;

    fn forecast(days: &[Option<((f64, u8), (f64, u8))>]) -> LocationForecast {
        let window = DateWindow::new(NaiveDate::from_ymd_opt(2024, 10, 15).unwrap(), days.len());
        let mut forecast = LocationForecast::empty(&window);
        for (index, day) in days.iter().enumerate() {
            if let Some(((mt, mr), (at, ar))) = day {
                let target = forecast.get_mut(index).unwrap();
                target.morning = Some(DaySlotValue {
                    temperature: *mt,
                    rain_chance: *mr,
                });
                target.afternoon = Some(DaySlotValue {
                    temperature: *at,
                    rain_chance: *ar,
                });
            }
        }
        forecast
    }

    #[test]
    fn test_best_and_worst() {
        // day0: 15 - 30 = -15, day1: 21 - 7.5 = 13.5
        let forecast = forecast(&[Some(((12.0, 10), (18.0, 50))), Some(((20.0, 5), (22.0, 10)))]);
        assert_eq!(
            rank(&forecast),
            Ranking {
                best_day: Some(1),
                worst_day: Some(0)
            }
        );
    }

    #[test]
    fn test_ties_resolve_to_first_occurrence() {
        let forecast = forecast(&[
            Some(((10.0, 20), (10.0, 20))),
            Some(((20.0, 0), (20.0, 0))),
            Some(((20.0, 0), (20.0, 0))),
            Some(((10.0, 20), (10.0, 20))),
        ]);
        let ranking = rank(&forecast);
        assert_eq!(ranking.best_day, Some(1));
        assert_eq!(ranking.worst_day, Some(0));
    }

    #[test]
    fn test_incomplete_days_are_skipped() {
        let mut forecast = forecast(&[None, Some(((5.0, 90), (6.0, 80))), None]);
        forecast.get_mut(0).unwrap().morning = Some(DaySlotValue {
            temperature: 30.0,
            rain_chance: 0,
        });
        let ranking = rank(&forecast);
        assert_eq!(ranking.best_day, Some(1));
        assert_eq!(ranking.worst_day, Some(1));
    }

    #[test]
    fn test_no_complete_day() {
        assert_eq!(rank(&forecast(&[None, None])), Ranking::default());
        assert_eq!(rank(&forecast(&[])), Ranking::default());
    }

    #[test]
    fn test_extremes_bound_all_scores() {
        let forecast = forecast(&[
            Some(((3.0, 40), (8.0, 60))),
            Some(((14.0, 0), (17.0, 10))),
            None,
            Some(((-2.0, 95), (1.0, 100))),
            Some(((9.0, 25), (11.0, 30))),
        ]);
        let ranking = rank(&forecast);
        let score = |i: usize| forecast.get(i).and_then(|d| d.comfort_score());
        let best = ranking.best_day.and_then(score).unwrap();
        let worst = ranking.worst_day.and_then(score).unwrap();
        for day in forecast.iter().filter_map(|d| d.comfort_score()) {
            assert!(best >= day);
            assert!(worst <= day);
        }
        assert_eq!(ranking.best_day, Some(1));
        assert_eq!(ranking.worst_day, Some(3));
    }
}
