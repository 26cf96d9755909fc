//! Provider-side data: the raw JSON body as received, and the typed view of
//! the samples the bucketizer works on.

use chrono::{DateTime, FixedOffset, Offset, Utc};
use serde::{Deserialize, Serialize};

/// A forecast response body exactly as the provider returned it.
///
/// The payload is kept untyped until bucketing, so a body that decodes as JSON
/// but lacks the expected structure can still be cached, inspected and logged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawPayload(pub serde_json::Value);

impl RawPayload {
    /// Interprets the payload as a forecast response.
    pub fn samples(&self) -> Result<ForecastResponse, serde_json::Error> {
        ForecastResponse::deserialize(&self.0)
    }

    /// Pretty-printed body, for diagnostics.
    pub fn dump(&self) -> String {
        serde_json::to_string_pretty(&self.0).unwrap_or_else(|_| self.0.to_string())
    }
}

impl From<serde_json::Value> for RawPayload {
    fn from(value: serde_json::Value) -> Self {
        Self(value)
    }
}

/// The subset of the provider's forecast response the pipeline relies on.
#[derive(Debug, Clone, Deserialize)]
pub struct ForecastResponse {
    #[serde(rename = "list")]
    pub samples: Vec<RawSample>,
    #[serde(default)]
    pub city: Option<City>,
}

impl ForecastResponse {
    /// The UTC offset local hours are computed in; UTC when the provider omitted it.
    pub fn utc_offset(&self) -> FixedOffset {
        self.city
            .as_ref()
            .and_then(|city| city.timezone)
            .and_then(FixedOffset::east_opt)
            .unwrap_or_else(|| Utc.fix())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct City {
    /// Shift in seconds from UTC.
    #[serde(default)]
    pub timezone: Option<i32>,
}

/// One provider-reported observation.
#[derive(Debug, Clone, Deserialize)]
pub struct RawSample {
    /// Unix timestamp, seconds.
    #[serde(rename = "dt")]
    pub timestamp: i64,
    pub main: MainReadings,
    /// Probability of precipitation, `0.0..=1.0`.
    #[serde(rename = "pop", default)]
    pub precipitation_probability: f64,
}

impl RawSample {
    pub fn temperature(&self) -> f64 {
        self.main.temp
    }

    /// The sample's instant in `offset`, or `None` for an out-of-range timestamp.
    pub fn local_time(&self, offset: &FixedOffset) -> Option<DateTime<FixedOffset>> {
        DateTime::from_timestamp(self.timestamp, 0).map(|utc| utc.with_timezone(offset))
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct MainReadings {
    pub temp: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;
    use serde_json::json;

    #[test]
    fn test_missing_pop_defaults_to_zero() {
        let payload = RawPayload(json!({ "list": [{ "dt": 0, "main": { "temp": 1.5 } }] }));
        let response = payload.samples().unwrap();
        assert_eq!(response.samples.len(), 1);
        assert_eq!(response.samples[0].precipitation_probability, 0.0);
        assert_eq!(response.samples[0].temperature(), 1.5);
    }

    #[test]
    fn test_missing_list_is_an_error() {
        let payload = RawPayload(json!({ "cod": "404", "message": "city not found" }));
        assert!(payload.samples().is_err());
        assert!(RawPayload(serde_json::Value::Null).samples().is_err());
    }

    #[test]
    fn test_utc_offset_from_city() {
        let payload = RawPayload(json!({
            "list": [{ "dt": 1_729_000_800, "main": { "temp": 10.0 } }],
            "city": { "timezone": 7200 }
        }));
        let response = payload.samples().unwrap();
        let offset = response.utc_offset();
        assert_eq!(offset.local_minus_utc(), 7200);
        // 2024-10-15T14:00:00Z
        let local = response.samples[0].local_time(&offset).unwrap();
        assert_eq!(local.hour(), 16);
    }

    #[test]
    fn test_utc_offset_defaults_to_utc() {
        let payload = RawPayload(json!({ "list": [] }));
        assert_eq!(payload.samples().unwrap().utc_offset().local_minus_utc(), 0);
    }
}
