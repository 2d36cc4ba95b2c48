//! Response bodies for the availability endpoint.

use serde::{Deserialize, Serialize};
use slotwatch_core::AvailabilityResult;

use crate::error::{ProtocolError, ProtocolResult};

/// `error` field of the fail-open body.
pub const FETCH_FAILED_ERROR: &str = "Failed to fetch availability";

/// `message` field when there is no future occurrence.
pub const NO_UPCOMING_MESSAGE: &str = "No upcoming events";

/// `error` field of the 405 body.
pub const METHOD_NOT_ALLOWED_ERROR: &str = "Method not allowed";

/// Availability for the next occurrence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailableBody {
    pub spots_left: u32,
    /// Start of the occurrence, as the booking provider wrote it.
    pub event_date: String,
    pub is_sold_out: bool,
    pub max_spots: u32,
    pub booked_count: u32,
    pub next_event_formatted: String,
}

/// No occurrence lies in the future. Always zero spots and sold out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoUpcomingBody {
    pub spots_left: u32,
    pub event_date: Option<String>,
    pub is_sold_out: bool,
    pub message: String,
}

/// Fail-open body: the upstream could not be read, so report full capacity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DegradedBody {
    pub error: String,
    pub message: String,
    pub spots_left: u32,
    pub is_sold_out: bool,
}

/// Any body the availability endpoint answers a `GET` with.
///
/// Variant order matters for decoding: the degraded body is the only one
/// with an `error` field, and the available body the only one without
/// `message`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AvailabilityResponse {
    Degraded(DegradedBody),
    NoUpcoming(NoUpcomingBody),
    Available(AvailableBody),
}

impl AvailabilityResponse {
    /// Builds the success body for a computed result.
    ///
    /// `event_date` is passed through untouched so clients see the
    /// provider's own timestamp.
    pub fn available(
        result: &AvailabilityResult,
        event_date: impl Into<String>,
        next_event_formatted: impl Into<String>,
    ) -> Self {
        Self::Available(AvailableBody {
            spots_left: result.spots_left,
            event_date: event_date.into(),
            is_sold_out: result.is_sold_out,
            max_spots: result.max_spots,
            booked_count: result.booked_count,
            next_event_formatted: next_event_formatted.into(),
        })
    }

    pub fn no_upcoming() -> Self {
        Self::NoUpcoming(NoUpcomingBody {
            spots_left: 0,
            event_date: None,
            is_sold_out: true,
            message: NO_UPCOMING_MESSAGE.to_string(),
        })
    }

    /// Fail-open body claiming every seat is free.
    pub fn degraded(capacity: u32, message: impl Into<String>) -> Self {
        Self::Degraded(DegradedBody {
            error: FETCH_FAILED_ERROR.to_string(),
            message: message.into(),
            spots_left: capacity,
            is_sold_out: false,
        })
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, Self::Degraded(_))
    }

    /// HTTP status the body is served with.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Degraded(_) => 500,
            Self::NoUpcoming(_) | Self::Available(_) => 200,
        }
    }

    pub fn spots_left(&self) -> u32 {
        match self {
            Self::Degraded(body) => body.spots_left,
            Self::NoUpcoming(body) => body.spots_left,
            Self::Available(body) => body.spots_left,
        }
    }

    pub fn is_sold_out(&self) -> bool {
        match self {
            Self::Degraded(body) => body.is_sold_out,
            Self::NoUpcoming(body) => body.is_sold_out,
            Self::Available(body) => body.is_sold_out,
        }
    }

    /// The two fields a display needs.
    pub fn snapshot(&self) -> AvailabilitySnapshot {
        AvailabilitySnapshot {
            spots_left: self.spots_left(),
            is_sold_out: self.is_sold_out(),
        }
    }

    /// Serializes the body to JSON bytes.
    pub fn to_json(&self) -> ProtocolResult<Vec<u8>> {
        serde_json::to_vec(self).map_err(ProtocolError::Serialization)
    }
}

/// Minimal view of any availability body, as read by pollers.
///
/// Unknown fields are ignored, so this decodes all three response shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilitySnapshot {
    pub spots_left: u32,
    pub is_sold_out: bool,
}

impl AvailabilitySnapshot {
    /// Value shown when the resolver cannot be reached.
    pub fn fallback(capacity: u32) -> Self {
        Self {
            spots_left: capacity,
            is_sold_out: false,
        }
    }

    /// Decodes a snapshot from a response body.
    pub fn from_json(body: &[u8]) -> ProtocolResult<Self> {
        serde_json::from_slice(body).map_err(ProtocolError::Deserialization)
    }
}

/// Body of a 405 response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn method_not_allowed() -> Self {
        Self {
            error: METHOD_NOT_ALLOWED_ERROR.to_string(),
        }
    }
}
