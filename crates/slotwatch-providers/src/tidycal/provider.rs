//! [`BookingProvider`] implementation for TidyCal.

use slotwatch_core::{BookingRecord, RecurrenceWindow};

use crate::error::{ProviderError, ProviderResult};
use crate::provider::{BookingProvider, BoxFuture};

use super::client::TidyCalClient;
use super::config::TidyCalConfig;

/// Name reported by [`TidyCalProvider`] and attached to its errors.
pub const PROVIDER_NAME: &str = "tidycal";

/// TidyCal booking provider for one booking type.
#[derive(Debug)]
pub struct TidyCalProvider {
    client: TidyCalClient,
}

impl TidyCalProvider {
    /// Validates the configuration and builds the HTTP client.
    pub fn new(config: TidyCalConfig) -> ProviderResult<Self> {
        config
            .validate()
            .map_err(|e| ProviderError::configuration(e).with_provider(PROVIDER_NAME))?;
        let client = TidyCalClient::new(config).map_err(|e| e.with_provider(PROVIDER_NAME))?;
        Ok(Self { client })
    }

    pub fn config(&self) -> &TidyCalConfig {
        self.client.config()
    }
}

impl BookingProvider for TidyCalProvider {
    fn name(&self) -> &str {
        PROVIDER_NAME
    }

    fn fetch_recurrence_windows(&self) -> BoxFuture<'_, ProviderResult<Vec<RecurrenceWindow>>> {
        Box::pin(async move {
            self.client
                .booking_type_windows()
                .await
                .map_err(|e| e.with_provider(PROVIDER_NAME))
        })
    }

    fn fetch_bookings(&self) -> BoxFuture<'_, ProviderResult<Vec<BookingRecord>>> {
        Box::pin(async move {
            self.client
                .bookings()
                .await
                .map_err(|e| e.with_provider(PROVIDER_NAME))
        })
    }
}
