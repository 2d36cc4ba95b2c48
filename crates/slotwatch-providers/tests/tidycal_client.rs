//! TidyCal provider against a mock TidyCal host.

use std::time::Duration;

use chrono::{TimeZone, Utc};
use serde_json::json;
use url::Url;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use slotwatch_core::BookingStatus;
use slotwatch_providers::tidycal::{TidyCalConfig, TidyCalProvider};
use slotwatch_providers::{BookingProvider, ProviderErrorCode};

const SLUG: &str = "benbugli/office-hours-group-session";

fn provider(server: &MockServer) -> TidyCalProvider {
    let config = TidyCalConfig::new(SLUG, "1728359", "secret-token")
        .unwrap()
        .with_base_url(Url::parse(&server.uri()).unwrap())
        .with_timeout(Duration::from_secs(2));
    TidyCalProvider::new(config).unwrap()
}

#[tokio::test]
async fn fetches_windows_from_page_feed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("/{}", SLUG)))
        .and(query_param("json", ""))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "bookingType": {
                "id": 1728359,
                "booking_type_windows": [
                    {"start_at": "2026-10-23T16:00:00.000000Z"},
                    {"start_at": "garbage"},
                    {"start_at": "2026-10-30T17:00:00.000000Z"}
                ]
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let windows = provider(&server).fetch_recurrence_windows().await.unwrap();

    assert_eq!(windows.len(), 2);
    assert_eq!(
        windows[0].start_at,
        Utc.with_ymd_and_hms(2026, 10, 23, 16, 0, 0).unwrap()
    );
    assert_eq!(windows[0].raw_start, "2026-10-23T16:00:00.000000Z");
    assert_eq!(windows[1].raw_start, "2026-10-30T17:00:00.000000Z");
}

#[tokio::test]
async fn fetches_bookings_with_bearer_token() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/bookings"))
        .and(query_param("booking_type_id", "1728359"))
        .and(header("authorization", "Bearer secret-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [
                {"id": 1, "start_at": "2026-10-23T16:00:00.000000Z", "status": "confirmed"},
                {"id": 2, "start_at": "2026-10-23T16:00:00.000000Z", "status": "cancelled"},
                {"id": 3}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let bookings = provider(&server).fetch_bookings().await.unwrap();

    assert_eq!(bookings.len(), 3);
    assert_eq!(bookings[1].status, BookingStatus::Cancelled);
    assert_eq!(bookings[2].start_at, None);
    assert_eq!(bookings[2].status, BookingStatus::Unspecified);
}

#[tokio::test]
async fn rejected_token_is_authentication_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/bookings"))
        .respond_with(ResponseTemplate::new(401).set_body_string("Unauthenticated."))
        .mount(&server)
        .await;

    let err = provider(&server).fetch_bookings().await.unwrap_err();

    assert_eq!(err.code(), ProviderErrorCode::AuthenticationFailed);
    assert_eq!(err.status(), Some(401));
    assert_eq!(err.provider(), Some("tidycal"));
    assert!(!err.is_format_error());
}

#[tokio::test]
async fn server_error_is_http_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("/{}", SLUG)))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .mount(&server)
        .await;

    let err = provider(&server)
        .fetch_recurrence_windows()
        .await
        .unwrap_err();

    assert_eq!(err.code(), ProviderErrorCode::HttpStatus);
    assert_eq!(err.status(), Some(503));
    assert!(err.message().contains("maintenance"));
}

#[tokio::test]
async fn malformed_feed_is_invalid_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("/{}", SLUG)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"bookingType": null})))
        .mount(&server)
        .await;

    let err = provider(&server)
        .fetch_recurrence_windows()
        .await
        .unwrap_err();

    assert_eq!(err.code(), ProviderErrorCode::InvalidResponse);
    assert!(err.is_format_error());
}

#[tokio::test]
async fn non_json_body_is_invalid_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/bookings"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>login</html>"))
        .mount(&server)
        .await;

    let err = provider(&server).fetch_bookings().await.unwrap_err();
    assert_eq!(err.code(), ProviderErrorCode::InvalidResponse);
}

#[tokio::test]
async fn slow_upstream_is_network_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/bookings"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"data": []}))
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;

    let config = TidyCalConfig::new(SLUG, "1728359", "secret-token")
        .unwrap()
        .with_base_url(Url::parse(&server.uri()).unwrap())
        .with_timeout(Duration::from_millis(200));
    let provider = TidyCalProvider::new(config).unwrap();

    let err = provider.fetch_bookings().await.unwrap_err();
    assert_eq!(err.code(), ProviderErrorCode::NetworkError);
    assert!(err.message().contains("timed out"));
}

#[test]
fn missing_token_is_configuration_error() {
    let config = TidyCalConfig::new(SLUG, "1728359", "").unwrap();
    let err = TidyCalProvider::new(config).unwrap_err();
    assert_eq!(err.code(), ProviderErrorCode::ConfigurationError);
}
