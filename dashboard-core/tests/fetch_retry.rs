//! Integration tests for the OpenWeather client against a mock HTTP server,
//! covering the retry budget, latency tracking and graceful degradation.

use dashboard_core::{OpenWeatherClient, Units};
use serde_json::json;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path, query_param},
};

fn sample_current_response() -> serde_json::Value {
    json!({
        "cod": 200,
        "name": "London",
        "timezone": 0,
        "sys": {"country": "GB", "sunrise": 1_700_000_000, "sunset": 1_700_030_000},
        "main": {"temp": 11.2, "feels_like": 10.1, "humidity": 81, "pressure": 1013},
        "wind": {"speed": 4.6},
        "clouds": {"all": 75},
        "weather": [{"main": "Clouds", "description": "broken clouds"}]
    })
}

fn test_client(server: &MockServer) -> OpenWeatherClient {
    OpenWeatherClient::with_base_urls("TEST_KEY".to_string(), &server.uri(), &server.uri())
        .expect("client must build")
}

#[tokio::test]
async fn first_attempt_success_returns_payload_and_latency() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/weather"))
        .and(query_param("q", "London"))
        .and(query_param("appid", "TEST_KEY"))
        .and(query_param("units", "metric"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_current_response()))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let result = client.current_weather("London", Units::Metric).await;

    let payload = result.payload.expect("payload must be present");
    assert_eq!(payload["name"], "London");
    assert!(result.latency_ms < 10_000);
}

#[tokio::test]
async fn three_failures_exhaust_the_attempt_budget() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(ResponseTemplate::new(503))
        .expect(3)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let result = client.current_weather("London", Units::Metric).await;

    assert!(result.payload.is_none());
    assert_eq!(result.latency_ms, 0);
}

#[tokio::test]
async fn recovers_after_transient_failures() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/forecast"))
        .respond_with(ResponseTemplate::new(500))
        .up_to_n_times(2)
        .expect(2)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/forecast"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"cod": "200", "list": []})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let result = client.forecast("London", Units::Metric).await;

    let payload = result.payload.expect("third attempt must succeed");
    assert_eq!(payload["cod"], "200");
}

#[tokio::test]
async fn undecodable_body_counts_as_a_failed_attempt() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .expect(3)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let result = client.current_weather("London", Units::Metric).await;

    assert!(result.payload.is_none());
    assert_eq!(result.latency_ms, 0);
}

#[tokio::test]
async fn imperial_units_are_passed_through() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/weather"))
        .and(query_param("units", "imperial"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_current_response()))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let result = client.current_weather("London", Units::Imperial).await;

    assert!(result.payload.is_some());
}

#[tokio::test]
async fn detect_city_reads_the_city_field() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/json/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"city": "Berlin"})))
        .mount(&server)
        .await;

    let client = test_client(&server);
    assert_eq!(client.detect_city().await.as_deref(), Some("Berlin"));
}

#[tokio::test]
async fn detect_city_failure_means_no_default() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/json/"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;

    let client = test_client(&server);
    assert_eq!(client.detect_city().await, None);
}
