//! This module provides the main entry point of the crate, [`WeatherMatrix`].
//! It fans out over the configured locations, pulls each location's forecast
//! through the response cache, and buckets the result onto the date window.

use crate::config::MatrixConfig;
use crate::error::WeatherMatrixError;
use crate::forecast_data::bucketizer::bucketize;
use crate::forecast_data::cache::ForecastCache;
use crate::forecast_data::error::ForecastDataError;
use crate::forecast_data::fetcher::{ForecastSource, OpenWeatherFetcher};
use crate::types::date_window::DateWindow;
use crate::types::forecast::{LocationForecast, LocationReport};
use crate::types::location::{LatLon, Location};
use crate::types::payload::RawPayload;
use bon::bon;
use futures_util::{stream, StreamExt};
use log::{info, warn};
use std::collections::HashMap;
use std::sync::Arc;

/// Aggregates bucketed forecasts for a fixed set of locations.
///
/// A `WeatherMatrix` owns its [`MatrixConfig`] and a [`ForecastCache`] in front
/// of a [`ForecastSource`]. The cache lives as long as the matrix, so repeated
/// aggregations within the process reuse earlier responses.
///
/// Per-location failures never fail an aggregation: a location whose fetch
/// errors or times out is logged and reported with an all-absent row.
///
/// # Examples
///
/// ```no_run
/// # use weather_matrix::{MatrixConfig, WeatherMatrix, WeatherMatrixError};
/// # #[tokio::main]
/// # async fn main() -> Result<(), WeatherMatrixError> {
/// let matrix = WeatherMatrix::new(MatrixConfig::builder().api_key("my-api-key").build())?;
///
/// for row in matrix.report().await {
///     println!(
///         "{}: best day {:?}, worst day {:?}",
///         row.location.name, row.ranking.best_day, row.ranking.worst_day
///     );
/// }
/// # Ok(())
/// # }
/// ```
pub struct WeatherMatrix<S = OpenWeatherFetcher> {
    config: MatrixConfig,
    cache: ForecastCache<S>,
}

impl WeatherMatrix<OpenWeatherFetcher> {
    /// Creates a matrix backed by the OpenWeatherMap provider.
    ///
    /// # Errors
    ///
    /// Returns [`WeatherMatrixError::HttpClient`] if the HTTP client cannot be built.
    pub fn new(config: MatrixConfig) -> Result<Self, WeatherMatrixError> {
        let fetcher =
            OpenWeatherFetcher::from_config(&config).map_err(WeatherMatrixError::HttpClient)?;
        Ok(Self::with_source(config, fetcher))
    }

    /// Creates a matrix from [`MatrixConfig::from_env`].
    pub fn from_env() -> Result<Self, WeatherMatrixError> {
        Self::new(MatrixConfig::from_env()?)
    }
}

#[bon]
impl<S: ForecastSource> WeatherMatrix<S> {
    /// Creates a matrix that fetches through `source`.
    pub fn with_source(config: MatrixConfig, source: S) -> Self {
        let cache = ForecastCache::new(source, config.cache_capacity, config.cache_ttl);
        Self { config, cache }
    }

    pub fn config(&self) -> &MatrixConfig {
        &self.config
    }

    pub fn cache(&self) -> &ForecastCache<S> {
        &self.cache
    }

    /// Forecasts every configured location over the configured window.
    ///
    /// The returned map has one key per configured location name, each mapping
    /// to a row of exactly `window.len()` days.
    pub async fn aggregate(&self) -> HashMap<String, LocationForecast> {
        self.aggregate_for(&self.config.locations, &self.config.window)
            .await
    }

    /// Like [`Self::aggregate`], for an explicit set of locations and window.
    pub async fn aggregate_for(
        &self,
        locations: &[Location],
        window: &DateWindow,
    ) -> HashMap<String, LocationForecast> {
        self.collect_forecasts(locations, window)
            .await
            .into_iter()
            .map(|(location, forecast)| (location.name.clone(), forecast))
            .collect()
    }

    /// Forecasts and ranks every configured location, in configured order.
    pub async fn report(&self) -> Vec<LocationReport> {
        self.collect_forecasts(&self.config.locations, &self.config.window)
            .await
            .into_iter()
            .map(|(location, forecast)| LocationReport {
                location: location.clone(),
                ranking: forecast.rank(),
                forecast,
            })
            .collect()
    }

    /// Forecasts a single location.
    ///
    /// * `.location(&Location)`: **Required.**
    /// * `.window(DateWindow)`: Optional. Defaults to the configured window.
    ///
    /// ```no_run
    /// # use weather_matrix::{Location, MatrixConfig, WeatherMatrix, WeatherMatrixError};
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), WeatherMatrixError> {
    /// let matrix = WeatherMatrix::new(MatrixConfig::builder().api_key("my-api-key").build())?;
    /// let utrecht = Location::new("Utrecht", 52.0907, 5.1214);
    /// let forecast = matrix.location_forecast().location(&utrecht).call().await;
    /// println!("{:?}", forecast.rank());
    /// # Ok(())
    /// # }
    /// ```
    #[builder]
    pub async fn location_forecast(
        &self,
        location: &Location,
        window: Option<DateWindow>,
    ) -> LocationForecast {
        let window = window.unwrap_or(self.config.window);
        self.forecast_or_empty(location, &window).await
    }

    async fn collect_forecasts<'a>(
        &self,
        locations: &'a [Location],
        window: &DateWindow,
    ) -> Vec<(&'a Location, LocationForecast)> {
        let concurrency = self.config.max_concurrent_requests.max(1);
        info!(
            "Aggregating forecasts for {} locations over {} ({} concurrent requests)",
            locations.len(),
            window,
            concurrency
        );

        stream::iter(locations)
            .map(|location| async move { (location, self.forecast_or_empty(location, window).await) })
            .buffered(concurrency)
            .collect()
            .await
    }

    async fn forecast_or_empty(&self, location: &Location, window: &DateWindow) -> LocationForecast {
        match self.fetch_with_timeout(location.coordinate).await {
            Ok(payload) => bucketize(&payload, window),
            Err(e) => {
                warn!("No data available for {}: {}", location.name, e);
                LocationForecast::empty(window)
            }
        }
    }

    async fn fetch_with_timeout(
        &self,
        coordinate: LatLon,
    ) -> Result<Arc<RawPayload>, ForecastDataError> {
        let timeout = self.config.request_timeout;
        match tokio::time::timeout(timeout, self.cache.get_or_fetch(coordinate)).await {
            Ok(result) => result,
            Err(_) => Err(ForecastDataError::Timeout {
                latitude: coordinate.latitude(),
                longitude: coordinate.longitude(),
                timeout,
            }),
        }
    }
}
