//! TidyCal HTTP client.
//!
//! Two endpoints are used:
//! - the public booking page feed (`<slug>?json`), unauthenticated, which
//!   lists the booking type's recurrence windows
//! - the bookings API (`api/bookings`), bearer-authenticated

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use url::Url;

use slotwatch_core::{BookingRecord, BookingStatus, RecurrenceWindow};

use crate::error::{ProviderError, ProviderResult};

use super::config::TidyCalConfig;

/// Low-level TidyCal API client.
#[derive(Debug)]
pub struct TidyCalClient {
    http_client: reqwest::Client,
    config: TidyCalConfig,
}

impl TidyCalClient {
    /// Creates a client for the given configuration.
    pub fn new(config: TidyCalConfig) -> ProviderResult<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| {
                ProviderError::configuration(format!("failed to create HTTP client: {}", e))
            })?;

        Ok(Self {
            http_client,
            config,
        })
    }

    pub fn config(&self) -> &TidyCalConfig {
        &self.config
    }

    /// Reads the booking type's recurrence windows from the public page feed.
    ///
    /// Windows whose `start_at` does not parse are skipped. Each window keeps
    /// the upstream `start_at` text alongside the parsed instant.
    pub async fn booking_type_windows(&self) -> ProviderResult<Vec<RecurrenceWindow>> {
        let url = self
            .config
            .page_feed_url()
            .map_err(ProviderError::configuration)?;
        let request = self
            .http_client
            .get(url.clone())
            .header(reqwest::header::ACCEPT, "application/json");

        let feed: PageFeedResponse = self.get_json(request, &url).await?;

        let windows: Vec<RecurrenceWindow> = feed
            .booking_type
            .booking_type_windows
            .into_iter()
            .filter_map(|window| match parse_timestamp(&window.start_at) {
                Ok(start_at) => Some(RecurrenceWindow::with_raw_start(start_at, window.start_at)),
                Err(e) => {
                    warn!(start_at = %window.start_at, "skipping window: {}", e);
                    None
                }
            })
            .collect();

        debug!(count = windows.len(), "fetched recurrence windows");
        Ok(windows)
    }

    /// Lists every booking for the configured booking type.
    pub async fn bookings(&self) -> ProviderResult<Vec<BookingRecord>> {
        let url = self
            .config
            .bookings_url()
            .map_err(ProviderError::configuration)?;
        let request = self
            .http_client
            .get(url.clone())
            .bearer_auth(&self.config.api_token)
            .header(reqwest::header::ACCEPT, "application/json");

        let list: BookingListResponse = self.get_json(request, &url).await?;

        let bookings: Vec<BookingRecord> = list
            .data
            .into_iter()
            .map(ApiBooking::into_record)
            .collect();

        debug!(count = bookings.len(), "fetched bookings");
        Ok(bookings)
    }

    /// Sends a request and decodes a JSON body, mapping failures to
    /// provider error codes.
    async fn get_json<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
        url: &Url,
    ) -> ProviderResult<T> {
        let response = request.send().await.map_err(|e| {
            let message = if e.is_timeout() {
                format!("request to {} timed out", url.path())
            } else if e.is_connect() {
                format!("connection to {} failed: {}", url.path(), e)
            } else {
                format!("request to {} failed: {}", url.path(), e)
            };
            ProviderError::network(message).with_source(e)
        })?;

        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(ProviderError::authentication(
                "TidyCal rejected the API token",
            ));
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::http_status(
                status.as_u16(),
                format!("TidyCal {} error ({}): {}", url.path(), status, truncate(&body)),
            ));
        }

        let body = response
            .text()
            .await
            .map_err(|e| ProviderError::network(format!("failed to read response: {}", e)))?;

        serde_json::from_str(&body).map_err(|e| {
            ProviderError::invalid_response(format!(
                "unexpected TidyCal {} payload: {}",
                url.path(),
                e
            ))
            .with_source(e)
        })
    }
}

/// Parses an RFC 3339 timestamp into UTC.
fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    DateTime::parse_from_rfc3339(raw).map(|dt| dt.with_timezone(&Utc))
}

/// Keeps error bodies short enough for a log line.
fn truncate(body: &str) -> &str {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => &body[..idx],
        None => body,
    }
}

/// Response from the public page feed.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PageFeedResponse {
    booking_type: ApiBookingType,
}

#[derive(Debug, Deserialize)]
struct ApiBookingType {
    booking_type_windows: Vec<ApiWindow>,
}

#[derive(Debug, Deserialize)]
struct ApiWindow {
    start_at: String,
}

/// Response from the bookings listing.
#[derive(Debug, Deserialize)]
struct BookingListResponse {
    data: Vec<ApiBooking>,
}

#[derive(Debug, Deserialize)]
struct ApiBooking {
    start_at: Option<String>,
    status: Option<String>,
}

impl ApiBooking {
    fn into_record(self) -> BookingRecord {
        let start_at = self.start_at.as_deref().and_then(|raw| {
            parse_timestamp(raw)
                .map_err(|e| debug!(start_at = raw, "unparseable booking start: {}", e))
                .ok()
        });
        BookingRecord {
            start_at,
            status: BookingStatus::from_raw(self.status.as_deref()),
        }
    }
}
