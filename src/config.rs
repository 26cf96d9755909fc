//! Run configuration for [`crate::WeatherMatrix`]: which locations to cover,
//! which dates to bucket onto, how to reach the provider, and how hard to hit it.

use crate::error::WeatherMatrixError;
use crate::forecast_data::cache::{DEFAULT_CACHE_CAPACITY, DEFAULT_CACHE_TTL};
use crate::types::date_window::DateWindow;
use crate::types::location::{default_locations, Location};
use bon::Builder;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::time::Duration;

pub const API_KEY_ENV: &str = "OPENWEATHER_API_KEY";
pub const START_DATE_ENV: &str = "WEATHER_MATRIX_START_DATE";
pub const DAYS_ENV: &str = "WEATHER_MATRIX_DAYS";

pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org";
/// The provider's forecast reaches five days ahead, which touches six calendar dates.
pub const DEFAULT_WINDOW_DAYS: usize = 6;
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_MAX_CONCURRENT_REQUESTS: usize = 4;

/// Unit system requested from the provider; decides the temperature scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitSystem {
    /// Degrees Celsius.
    #[default]
    Metric,
    /// Degrees Fahrenheit.
    Imperial,
    /// Kelvin.
    Standard,
}

impl UnitSystem {
    pub(crate) fn as_query_value(&self) -> &'static str {
        match self {
            UnitSystem::Metric => "metric",
            UnitSystem::Imperial => "imperial",
            UnitSystem::Standard => "standard",
        }
    }

    pub fn temperature_symbol(&self) -> &'static str {
        match self {
            UnitSystem::Metric => "°C",
            UnitSystem::Imperial => "°F",
            UnitSystem::Standard => "K",
        }
    }
}

impl fmt::Display for UnitSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_query_value())
    }
}

/// Everything a [`crate::WeatherMatrix`] needs, passed in once at construction.
///
/// Only the API key is required; every other field has a default.
///
/// # Examples
///
/// ```
/// use weather_matrix::{DateWindow, Location, MatrixConfig};
/// use chrono::NaiveDate;
/// use std::time::Duration;
///
/// let config = MatrixConfig::builder()
///     .api_key("my-api-key")
///     .locations(vec![Location::new("Gouda", 52.0115, 4.7104)])
///     .window(DateWindow::new(NaiveDate::from_ymd_opt(2024, 10, 15).unwrap(), 5))
///     .request_timeout(Duration::from_secs(5))
///     .build();
///
/// assert_eq!(config.locations.len(), 1);
/// assert_eq!(config.cache_capacity, 128);
/// ```
#[derive(Debug, Clone, Builder)]
pub struct MatrixConfig {
    /// Provider credential. Treated as an opaque secret and never logged.
    #[builder(into)]
    pub api_key: String,
    #[builder(default = default_locations())]
    pub locations: Vec<Location>,
    #[builder(default = DateWindow::starting_today(DEFAULT_WINDOW_DAYS))]
    pub window: DateWindow,
    #[builder(into, default = DEFAULT_BASE_URL.to_string())]
    pub base_url: String,
    #[builder(default)]
    pub units: UnitSystem,
    /// Upper bound for a single location's fetch.
    #[builder(default = DEFAULT_REQUEST_TIMEOUT)]
    pub request_timeout: Duration,
    /// How many provider requests may be in flight at once. Zero is treated as one.
    #[builder(default = DEFAULT_MAX_CONCURRENT_REQUESTS)]
    pub max_concurrent_requests: usize,
    /// Maximum number of distinct coordinates kept in the response cache.
    #[builder(default = DEFAULT_CACHE_CAPACITY)]
    pub cache_capacity: usize,
    /// Age after which a cached response is fetched again.
    #[builder(default = DEFAULT_CACHE_TTL)]
    pub cache_ttl: Duration,
}

impl MatrixConfig {
    /// Builds a configuration from the process environment.
    ///
    /// * `OPENWEATHER_API_KEY`: required.
    /// * `WEATHER_MATRIX_START_DATE`: optional, `YYYY-MM-DD`; defaults to today.
    /// * `WEATHER_MATRIX_DAYS`: optional window length; defaults to 6.
    ///
    /// # Errors
    ///
    /// Returns [`WeatherMatrixError::MissingEnvVar`] when the API key is unset or
    /// empty, and [`WeatherMatrixError::InvalidEnvVar`] when an optional variable
    /// cannot be parsed.
    pub fn from_env() -> Result<Self, WeatherMatrixError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, WeatherMatrixError> {
        let api_key = lookup(API_KEY_ENV)
            .filter(|key| !key.trim().is_empty())
            .ok_or(WeatherMatrixError::MissingEnvVar(API_KEY_ENV))?;

        let start = lookup(START_DATE_ENV)
            .map(|value| {
                NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|e| {
                    WeatherMatrixError::InvalidEnvVar {
                        name: START_DATE_ENV,
                        value: value.clone(),
                        reason: e.to_string(),
                    }
                })
            })
            .transpose()?;

        let days = lookup(DAYS_ENV)
            .map(|value| {
                value
                    .trim()
                    .parse::<usize>()
                    .map_err(|e| WeatherMatrixError::InvalidEnvVar {
                        name: DAYS_ENV,
                        value: value.clone(),
                        reason: e.to_string(),
                    })
            })
            .transpose()?
            .unwrap_or(DEFAULT_WINDOW_DAYS);

        let window = match start {
            Some(start) => DateWindow::new(start, days),
            None => DateWindow::starting_today(days),
        };

        Ok(Self::builder().api_key(api_key).window(window).build())
    }
}
