//! Integration tests for OpenWeatherFetcher against a mock HTTP server.

use std::time::Duration;
use weather_matrix::{ForecastDataError, ForecastSource, LatLon, OpenWeatherFetcher, UnitSystem};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn forecast_body() -> serde_json::Value {
    serde_json::json!({
        "cod": "200",
        "list": [
            { "dt": 1_729_000_800, "main": { "temp": 13.37 }, "pop": 0.25 }
        ],
        "city": { "name": "Gouda", "timezone": 7200 }
    })
}

fn fetcher(server: &MockServer, timeout: Duration) -> OpenWeatherFetcher {
    OpenWeatherFetcher::new(&server.uri(), "test-key", UnitSystem::Metric, timeout).unwrap()
}

#[tokio::test]
async fn test_fetch_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data/2.5/forecast"))
        .and(query_param("lat", "52.0115"))
        .and(query_param("lon", "4.7104"))
        .and(query_param("appid", "test-key"))
        .and(query_param("units", "metric"))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let payload = fetcher(&mock_server, Duration::from_secs(5))
        .fetch(LatLon(52.0115, 4.7104))
        .await
        .unwrap();

    assert_eq!(payload.0, forecast_body());
    let response = payload.samples().unwrap();
    assert_eq!(response.samples.len(), 1);
    assert_eq!(response.utc_offset().local_minus_utc(), 7200);
}

#[tokio::test]
async fn test_fetch_http_error_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data/2.5/forecast"))
        .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
            "cod": 401,
            "message": "Invalid API key"
        })))
        .mount(&mock_server)
        .await;

    let err = fetcher(&mock_server, Duration::from_secs(5))
        .fetch(LatLon(52.0, 4.0))
        .await
        .unwrap_err();

    match err {
        ForecastDataError::HttpStatus { url, status, .. } => {
            assert_eq!(status.as_u16(), 401);
            assert!(url.contains("appid=REDACTED"));
            assert!(!url.contains("test-key"));
        }
        other => panic!("expected HttpStatus, got {other:?}"),
    }
}

#[tokio::test]
async fn test_fetch_undecodable_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data/2.5/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&mock_server)
        .await;

    let err = fetcher(&mock_server, Duration::from_secs(5))
        .fetch(LatLon(52.0, 4.0))
        .await
        .unwrap_err();

    assert!(matches!(err, ForecastDataError::Decode { .. }));
}

#[tokio::test]
async fn test_fetch_times_out() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data/2.5/forecast"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(forecast_body())
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&mock_server)
        .await;

    let err = fetcher(&mock_server, Duration::from_millis(100))
        .fetch(LatLon(52.0, 4.0))
        .await
        .unwrap_err();

    match err {
        ForecastDataError::NetworkRequest(_, source) => assert!(source.is_timeout()),
        other => panic!("expected NetworkRequest timeout, got {other:?}"),
    }
}

#[tokio::test]
async fn test_fetch_connection_refused() {
    // Nothing listens on the tcpmux port on loopback.
    let fetcher = OpenWeatherFetcher::new(
        "http://127.0.0.1:1",
        "test-key",
        UnitSystem::Metric,
        Duration::from_secs(5),
    )
    .unwrap();
    let err = fetcher.fetch(LatLon(52.0, 4.0)).await.unwrap_err();

    assert!(matches!(err, ForecastDataError::NetworkRequest(..)));
}
