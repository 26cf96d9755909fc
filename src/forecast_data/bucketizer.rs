//! Maps a location's irregular forecast samples onto the fixed
//! (date, [`Slot`]) grid of a [`DateWindow`].

use crate::forecast_data::error::ForecastDataError;
use crate::types::date_window::DateWindow;
use crate::types::forecast::{DaySlotValue, LocationForecast};
use crate::types::payload::{RawPayload, RawSample};
use crate::types::slot::Slot;
use crate::utils::{probability_to_percent, round_to_tenth};
use chrono::{FixedOffset, Timelike};
use log::{debug, error};

/// Buckets `payload` onto `window`, falling back to an all-absent row.
///
/// A payload that does not have the shape of a forecast response is logged
/// together with a dump of what was received. The returned row always has
/// one entry per window date.
pub fn bucketize(payload: &RawPayload, window: &DateWindow) -> LocationForecast {
    match try_bucketize(payload, window) {
        Ok(forecast) => forecast,
        Err(e) => {
            error!("Invalid data format ({}). Data received: {}", e, payload.dump());
            LocationForecast::empty(window)
        }
    }
}

/// Buckets `payload` onto `window`.
///
/// Samples are visited in payload order. For every sample whose local date is
/// inside the window and whose local hour falls in a [`Slot`], the slot is
/// filled unless an earlier sample already filled it.
///
/// # Errors
///
/// Returns [`ForecastDataError::MalformedPayload`] if the payload lacks the
/// sample list or a sample lacks its timestamp or temperature.
pub fn try_bucketize(
    payload: &RawPayload,
    window: &DateWindow,
) -> Result<LocationForecast, ForecastDataError> {
    let response = payload
        .samples()
        .map_err(ForecastDataError::MalformedPayload)?;
    let offset = response.utc_offset();

    let mut forecast = LocationForecast::empty(window);
    for sample in &response.samples {
        place_sample(&mut forecast, sample, window, &offset);
    }
    Ok(forecast)
}

fn place_sample(
    forecast: &mut LocationForecast,
    sample: &RawSample,
    window: &DateWindow,
    offset: &FixedOffset,
) {
    let Some(local) = sample.local_time(offset) else {
        debug!("Skipping sample with out-of-range timestamp {}", sample.timestamp);
        return;
    };
    let Some(index) = window.index_of(local.date_naive()) else {
        return;
    };
    let Some(slot) = Slot::from_hour(local.hour()) else {
        return;
    };
    let Some(day) = forecast.get_mut(index) else {
        return;
    };

    let cell = day.slot_mut(slot);
    if cell.is_none() {
        *cell = Some(DaySlotValue {
            temperature: round_to_tenth(sample.temperature()),
            rain_chance: probability_to_percent(sample.precipitation_probability),
        });
    }
}
