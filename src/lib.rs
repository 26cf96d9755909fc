//! Forecast aggregation for a fixed set of locations.
//!
//! [`WeatherMatrix`] fetches a multi-day forecast per location (through a
//! bounded, single-flight [`ForecastCache`]), buckets the samples into a
//! morning and afternoon value per date of a [`DateWindow`], and ranks the
//! best and worst day of each location.

mod config;
mod error;
mod forecast_data;
mod types;
mod utils;
mod weather_matrix;

pub use config::*;
pub use error::WeatherMatrixError;
pub use weather_matrix::*;

pub use forecast_data::bucketizer::{bucketize, try_bucketize};
pub use forecast_data::cache::{ForecastCache, DEFAULT_CACHE_CAPACITY, DEFAULT_CACHE_TTL};
pub use forecast_data::error::ForecastDataError;
pub use forecast_data::fetcher::{ForecastSource, OpenWeatherFetcher};
pub use forecast_data::ranker::rank;

pub use types::date_window::DateWindow;
pub use types::forecast::*;
pub use types::location::{default_locations, LatLon, Location};
pub use types::payload::{City, ForecastResponse, MainReadings, RawPayload, RawSample};
pub use types::slot::Slot;
