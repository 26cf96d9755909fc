use crate::forecast_data::error::ForecastDataError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WeatherMatrixError {
    #[error(transparent)]
    ForecastData(#[from] ForecastDataError),

    #[error("Environment variable '{0}' is not set")]
    MissingEnvVar(&'static str),

    #[error("Environment variable '{name}' has invalid value '{value}': {reason}")]
    InvalidEnvVar {
        name: &'static str,
        value: String,
        reason: String,
    },

    #[error("Failed to build HTTP client")]
    HttpClient(#[source] reqwest::Error),
}
