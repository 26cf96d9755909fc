use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ForecastDataError {
    #[error("Network request failed for {0}")]
    NetworkRequest(String, #[source] reqwest::Error),

    #[error("HTTP request failed for {url} with status {status}")]
    HttpStatus {
        url: String,
        status: reqwest::StatusCode,
        #[source]
        source: reqwest::Error,
    },

    #[error("Failed to decode forecast response from {url}")]
    Decode {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Forecast request for {latitude},{longitude} timed out after {timeout:?}")]
    Timeout {
        latitude: f64,
        longitude: f64,
        timeout: Duration,
    },

    // Body was valid JSON but not shaped like a forecast response
    #[error("Forecast payload is missing expected fields")]
    MalformedPayload(#[source] serde_json::Error),

    // One fetch failure handed to every caller that waited on it
    #[error(transparent)]
    Shared(Arc<ForecastDataError>),
}
