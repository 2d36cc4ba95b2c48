//! Spots widget against a mock resolver and a real one.

use std::sync::Arc;
use std::time::Duration;

use chrono::{Duration as ChronoDuration, DurationRound, Utc};
use serde_json::json;
use tokio::net::TcpListener;
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use slotwatch_client::{
    AvailabilityClient, ClientError, DisplayElement, DisplaySurface, RenderConfig, SpotsWidget,
    TerminalSurface,
};
use slotwatch_core::{BookingRecord, BookingStatus, ColorBand, RecurrenceWindow};
use slotwatch_providers::StaticProvider;
use slotwatch_server::{AvailabilityServer, ServerConfig};

const SPOTS_PATH: &str = "/api/tidycal-spots";

fn instant_render() -> RenderConfig {
    RenderConfig {
        animation: Duration::ZERO,
        ..Default::default()
    }
}

fn widget(url: Url) -> SpotsWidget<TerminalSurface<Vec<u8>>> {
    let client = AvailabilityClient::new(url, Duration::from_secs(2)).unwrap();
    let surface = TerminalSurface::new(Vec::new(), DisplayElement::ALL.to_vec()).with_color(false);
    SpotsWidget::new(client, surface, instant_render())
}

async fn mock_widget(response: ResponseTemplate) -> (MockServer, SpotsWidget<TerminalSurface<Vec<u8>>>) {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(SPOTS_PATH))
        .respond_with(response)
        .mount(&server)
        .await;
    let url = Url::parse(&format!("{}{}", server.uri(), SPOTS_PATH)).unwrap();
    (server, widget(url))
}

/// Surface that logs each call in order.
#[derive(Debug, Default)]
struct CallLog {
    calls: Vec<String>,
    updating: Vec<bool>,
    count: Option<u32>,
}

impl DisplaySurface for CallLog {
    fn has(&self, _element: DisplayElement) -> bool {
        true
    }
    fn set_updating(&mut self, updating: bool) {
        self.updating.push(updating);
        self.calls.push(format!("updating={}", updating));
    }
    fn current_count(&self) -> Option<u32> {
        self.count
    }
    fn set_count(&mut self, count: u32) {
        self.count = Some(count);
        self.calls.push(format!("count={}", count));
    }
    fn set_label(&mut self, label: &str) {
        self.calls.push(format!("label={}", label));
    }
    fn set_band(&mut self, band: ColorBand) {
        self.calls.push(format!("band={:?}", band));
    }
    fn show_sold_out(&mut self) {
        self.calls.push("sold_out".to_string());
    }
}

async fn logged_update(response: ResponseTemplate) -> CallLog {
    let (server, _) = mock_widget(response).await;
    let url = Url::parse(&format!("{}{}", server.uri(), SPOTS_PATH)).unwrap();
    let client = AvailabilityClient::new(url, Duration::from_secs(2)).unwrap();
    let mut widget = SpotsWidget::new(client, CallLog::default(), instant_render());

    widget.update().await;
    std::mem::take(widget.surface_mut())
}

#[tokio::test]
async fn updating_mark_wraps_a_successful_cycle() {
    let log = logged_update(ResponseTemplate::new(200).set_body_json(json!({
        "spotsLeft": 2,
        "isSoldOut": false
    })))
    .await;

    assert_eq!(log.updating, vec![true, false]);
    assert_eq!(log.calls.first().map(String::as_str), Some("updating=true"));
    assert_eq!(log.calls.last().map(String::as_str), Some("updating=false"));
    assert!(log.calls.contains(&"count=2".to_string()));
}

#[tokio::test]
async fn updating_mark_is_cleared_after_a_failed_fetch() {
    let log = logged_update(ResponseTemplate::new(503)).await;

    assert_eq!(log.updating, vec![true, false]);
    assert_eq!(log.calls.last().map(String::as_str), Some("updating=false"));
    // The fallback was drawn between the two marks.
    assert!(log.calls.contains(&"count=8".to_string()));
}

#[tokio::test]
async fn renders_resolver_snapshot() {
    let (_server, mut widget) = mock_widget(ResponseTemplate::new(200).set_body_json(json!({
        "spotsLeft": 5,
        "eventDate": "2026-10-23T16:00:00Z",
        "isSoldOut": false,
        "maxSpots": 8,
        "bookedCount": 3,
        "nextEventFormatted": "23 ottobre 2026 alle ore 18:00"
    })))
    .await;

    widget.update().await;
    assert_eq!(widget.surface().line(), "5 spots left");
}

#[tokio::test]
async fn renders_sold_out() {
    let (_server, mut widget) = mock_widget(ResponseTemplate::new(200).set_body_json(json!({
        "spotsLeft": 0,
        "eventDate": null,
        "isSoldOut": true,
        "message": "No upcoming events"
    })))
    .await;

    widget.update().await;
    assert_eq!(widget.surface().line(), "Sold out");
}

#[tokio::test]
async fn degraded_resolver_shows_fallback() {
    let (_server, mut widget) = mock_widget(ResponseTemplate::new(500).set_body_json(json!({
        "error": "Failed to fetch availability",
        "message": "upstream fetch failed",
        "spotsLeft": 8,
        "isSoldOut": false
    })))
    .await;

    widget.update().await;
    assert_eq!(widget.surface().line(), "8 spots left");
}

#[tokio::test]
async fn malformed_body_shows_fallback() {
    let (_server, mut widget) =
        mock_widget(ResponseTemplate::new(200).set_body_string("<html>oops</html>")).await;

    widget.update().await;
    assert_eq!(widget.surface().line(), "8 spots left");
}

#[tokio::test]
async fn client_reports_status_and_decode_errors() {
    let (server, _) = mock_widget(ResponseTemplate::new(503)).await;
    let url = Url::parse(&format!("{}{}", server.uri(), SPOTS_PATH)).unwrap();
    let client = AvailabilityClient::new(url, Duration::from_secs(2)).unwrap();
    assert!(matches!(client.fetch().await, Err(ClientError::Status(503))));

    let (server, _) = mock_widget(ResponseTemplate::new(200).set_body_json(json!({"spots": 3}))).await;
    let url = Url::parse(&format!("{}{}", server.uri(), SPOTS_PATH)).unwrap();
    let client = AvailabilityClient::new(url, Duration::from_secs(2)).unwrap();
    assert!(matches!(client.fetch().await, Err(ClientError::Decode(_))));
}

#[tokio::test]
async fn unreachable_resolver_shows_fallback() {
    // Bind then drop to get a port nothing listens on.
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let mut widget = widget(Url::parse(&format!("http://{}{}", addr, SPOTS_PATH)).unwrap());
    widget.update().await;
    assert_eq!(widget.surface().line(), "8 spots left");
}

#[tokio::test]
async fn polls_a_running_resolver() {
    let start = (Utc::now() + ChronoDuration::days(2))
        .duration_trunc(ChronoDuration::minutes(1))
        .unwrap();
    let bookings = (0..7)
        .map(|_| BookingRecord::new(start, BookingStatus::Other("confirmed".into())))
        .collect();
    let provider = StaticProvider::new(vec![RecurrenceWindow::new(start)], bookings);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let server = AvailabilityServer::new(
        ServerConfig::default().with_request_logging(false),
        Arc::new(provider),
    )
    .unwrap();

    let (stop_tx, stop_rx) = tokio::sync::oneshot::channel::<()>();
    let server_task = tokio::spawn(server.serve_on(listener, async move {
        let _ = stop_rx.await;
    }));

    let mut widget = widget(Url::parse(&format!("http://{}{}", addr, SPOTS_PATH)).unwrap());
    widget.update().await;
    assert_eq!(widget.surface().line(), "1 spot left");

    let _ = stop_tx.send(());
    server_task.await.unwrap().unwrap();
}
