//! HTTP client for the availability endpoint.

use std::time::Duration;

use tracing::debug;
use url::Url;

use slotwatch_protocol::AvailabilitySnapshot;

use crate::error::{ClientError, ClientResult};

/// Reads availability from a running resolver.
#[derive(Debug, Clone)]
pub struct AvailabilityClient {
    http_client: reqwest::Client,
    url: Url,
}

impl AvailabilityClient {
    pub fn new(url: Url, timeout: Duration) -> ClientResult<Self> {
        let http_client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { http_client, url })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Fetches the current snapshot.
    ///
    /// Any non-2xx status is an error, including the resolver's own
    /// fail-open 500.
    pub async fn fetch(&self) -> ClientResult<AvailabilitySnapshot> {
        let response = self
            .http_client
            .get(self.url.clone())
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Status(status.as_u16()));
        }

        let body = response.bytes().await?;
        let snapshot = AvailabilitySnapshot::from_json(&body)?;
        debug!(
            spots_left = snapshot.spots_left,
            sold_out = snapshot.is_sold_out,
            "fetched availability"
        );
        Ok(snapshot)
    }
}
