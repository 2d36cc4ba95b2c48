//! Availability resolution for the next occurrence.
//!
//! One pass performs two sequential upstream calls and holds no state
//! between passes: the next occurrence is recomputed every time.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, error, info};

use slotwatch_core::{AvailabilityResult, count_booked, format_event_date, select_next_occurrence};
use slotwatch_protocol::AvailabilityResponse;
use slotwatch_providers::BookingProvider;

use crate::config::ResolverConfig;
use crate::error::ResolveResult;

/// Outcome of a successful resolution pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Availability for the next occurrence.
    Upcoming {
        result: AvailabilityResult,
        /// Start of the occurrence as the provider wrote it.
        event_date: String,
        /// Event date rendered for humans in the configured timezone.
        formatted: String,
    },
    /// Every known occurrence is in the past.
    NoUpcomingEvents,
}

impl Resolution {
    pub fn into_response(self) -> AvailabilityResponse {
        match self {
            Self::Upcoming {
                result,
                event_date,
                formatted,
            } => AvailabilityResponse::available(&result, event_date, formatted),
            Self::NoUpcomingEvents => AvailabilityResponse::no_upcoming(),
        }
    }
}

/// Computes remaining spots from a booking provider.
pub struct AvailabilityResolver {
    provider: Arc<dyn BookingProvider>,
    config: ResolverConfig,
}

impl AvailabilityResolver {
    pub fn new(provider: Arc<dyn BookingProvider>, config: ResolverConfig) -> Self {
        Self { provider, config }
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Resolves availability as of now.
    pub async fn resolve(&self) -> ResolveResult<Resolution> {
        self.resolve_at(Utc::now()).await
    }

    /// Resolves availability as of `now`.
    ///
    /// Bookings are only fetched when an upcoming occurrence exists.
    pub async fn resolve_at(&self, now: DateTime<Utc>) -> ResolveResult<Resolution> {
        let windows = self.provider.fetch_recurrence_windows().await?;

        let Some(occurrence) = select_next_occurrence(&windows, now) else {
            info!(windows = windows.len(), "no upcoming occurrence");
            return Ok(Resolution::NoUpcomingEvents);
        };
        debug!(start_at = %occurrence.start_at, "selected next occurrence");

        let bookings = self.provider.fetch_bookings().await?;
        let booked = count_booked(&bookings, &occurrence);
        let result = AvailabilityResult::compute(self.config.capacity, booked, occurrence.start_at);

        info!(
            start_at = %occurrence.start_at,
            bookings = bookings.len(),
            booked = result.booked_count,
            spots_left = result.spots_left,
            sold_out = result.is_sold_out,
            "resolved availability"
        );

        Ok(Resolution::Upcoming {
            result,
            formatted: format_event_date(occurrence.start_at, self.config.timezone),
            event_date: occurrence.raw_start,
        })
    }

    /// Resolves as of now and converts the outcome into a response body.
    pub async fn respond(&self) -> AvailabilityResponse {
        self.respond_at(Utc::now()).await
    }

    /// Resolves as of `now`, failing open.
    ///
    /// Any error yields the degraded body with full capacity and not sold
    /// out.
    pub async fn respond_at(&self, now: DateTime<Utc>) -> AvailabilityResponse {
        match self.resolve_at(now).await {
            Ok(resolution) => resolution.into_response(),
            Err(e) => {
                error!(
                    error = %e,
                    kind = e.kind(),
                    provider = self.provider.name(),
                    "failed to resolve availability, reporting full capacity"
                );
                AvailabilityResponse::degraded(self.config.capacity, e.to_string())
            }
        }
    }
}
