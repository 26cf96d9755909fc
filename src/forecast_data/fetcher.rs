use crate::config::{MatrixConfig, UnitSystem};
use crate::forecast_data::error::ForecastDataError;
use crate::types::location::LatLon;
use crate::types::payload::RawPayload;
use crate::utils::redact_api_key;
use log::{error, info, warn};
use reqwest::{Client, Request};
use std::future::Future;
use std::time::Duration;

const FORECAST_PATH: &str = "/data/2.5/forecast";

/// Anything that can produce a raw forecast body for a coordinate.
///
/// [`OpenWeatherFetcher`] is the production implementation; the cache and the
/// aggregator only depend on this trait.
pub trait ForecastSource: Send + Sync {
    fn fetch(
        &self,
        coordinate: LatLon,
    ) -> impl Future<Output = Result<RawPayload, ForecastDataError>> + Send;
}

/// Fetches multi-day forecasts from the OpenWeatherMap 5 day / 3 hour endpoint.
#[derive(Debug, Clone)]
pub struct OpenWeatherFetcher {
    client: Client,
    endpoint: String,
    api_key: String,
    units: UnitSystem,
}

impl OpenWeatherFetcher {
    pub fn new(
        base_url: &str,
        api_key: impl Into<String>,
        units: UnitSystem,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(client, base_url, api_key, units))
    }

    pub fn from_config(config: &MatrixConfig) -> Result<Self, reqwest::Error> {
        Self::new(
            &config.base_url,
            config.api_key.clone(),
            config.units,
            config.request_timeout,
        )
    }

    /// Uses a preconfigured client, e.g. one with a proxy or custom TLS setup.
    pub fn with_client(
        client: Client,
        base_url: &str,
        api_key: impl Into<String>,
        units: UnitSystem,
    ) -> Self {
        Self {
            client,
            endpoint: format!("{}{}", base_url.trim_end_matches('/'), FORECAST_PATH),
            api_key: api_key.into(),
            units,
        }
    }

    fn build_request(&self, coordinate: LatLon) -> Result<Request, ForecastDataError> {
        let latitude = coordinate.latitude().to_string();
        let longitude = coordinate.longitude().to_string();
        self.client
            .get(&self.endpoint)
            .query(&[
                ("lat", latitude.as_str()),
                ("lon", longitude.as_str()),
                ("appid", self.api_key.as_str()),
                ("units", self.units.as_query_value()),
            ])
            .build()
            .map_err(|e| ForecastDataError::NetworkRequest(self.endpoint.clone(), e.without_url()))
    }

    async fn execute(&self, request: Request, url: &str) -> Result<RawPayload, ForecastDataError> {
        let response = self
            .client
            .execute(request)
            .await
            .map_err(|e| ForecastDataError::NetworkRequest(url.to_string(), e.without_url()))?;

        let response = match response.error_for_status() {
            Ok(resp) => resp,
            Err(e) => {
                warn!("HTTP error for {}: {:?}", url, e.status());
                let e = e.without_url();
                return Err(if let Some(status) = e.status() {
                    ForecastDataError::HttpStatus {
                        url: url.to_string(),
                        status,
                        source: e,
                    }
                } else {
                    ForecastDataError::NetworkRequest(url.to_string(), e)
                });
            }
        };

        response
            .json::<serde_json::Value>()
            .await
            .map(RawPayload)
            .map_err(|e| ForecastDataError::Decode {
                url: url.to_string(),
                source: e.without_url(),
            })
    }
}

impl ForecastSource for OpenWeatherFetcher {
    async fn fetch(&self, coordinate: LatLon) -> Result<RawPayload, ForecastDataError> {
        let request = self.build_request(coordinate)?;
        let url = redact_api_key(request.url());
        info!("Requesting forecast for {} from {}", coordinate, url);

        let result = self.execute(request, &url).await;
        if let Err(e) = &result {
            error!("Error fetching forecast for {}: {}", coordinate, e);
            error!("URL: {}", url);
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_joins_base_url() {
        let fetcher = OpenWeatherFetcher::with_client(
            Client::new(),
            "http://localhost:1234/",
            "key",
            UnitSystem::Metric,
        );
        assert_eq!(fetcher.endpoint, "http://localhost:1234/data/2.5/forecast");
    }

    #[test]
    fn test_request_carries_query() {
        let fetcher = OpenWeatherFetcher::with_client(
            Client::new(),
            "http://localhost:1234",
            "key",
            UnitSystem::Imperial,
        );
        let request = fetcher.build_request(LatLon(52.0115, 4.7104)).unwrap();
        assert_eq!(
            request.url().query(),
            Some("lat=52.0115&lon=4.7104&appid=key&units=imperial")
        );
    }
}
