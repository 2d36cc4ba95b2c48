//! Recurrence windows and booking records.
//!
//! These are the provider-agnostic shapes the availability computation works
//! on. Providers convert their wire formats into these types; nothing here
//! knows about HTTP or JSON field names.

use std::fmt;

use chrono::{DateTime, Datelike, SecondsFormat, Timelike, Utc};
use serde::{Deserialize, Serialize};

/// One scheduled instance of a recurring event.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RecurrenceWindow {
    /// When this instance starts, in UTC.
    pub start_at: DateTime<Utc>,
    /// The start timestamp exactly as the provider sent it.
    pub raw_start: String,
}

impl RecurrenceWindow {
    /// Creates a window starting at the given instant.
    ///
    /// The raw start is the instant in RFC 3339 UTC form.
    pub fn new(start_at: DateTime<Utc>) -> Self {
        Self {
            start_at,
            raw_start: start_at.to_rfc3339_opts(SecondsFormat::AutoSi, true),
        }
    }

    /// Creates a window from a provider timestamp and its parsed instant.
    pub fn with_raw_start(start_at: DateTime<Utc>, raw_start: impl Into<String>) -> Self {
        Self {
            start_at,
            raw_start: raw_start.into(),
        }
    }

    /// Returns `true` if this window starts strictly after `now`.
    pub fn is_after(&self, now: DateTime<Utc>) -> bool {
        self.start_at > now
    }
}

/// Lifecycle state of a booking as reported by the provider.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    /// The provider did not report a status.
    Unspecified,
    /// Cancelled bookings free their seat.
    Cancelled,
    /// Any other provider status; the raw string is kept for logging.
    Other(String),
}

impl BookingStatus {
    /// Maps a raw provider status string.
    ///
    /// Only the exact string `cancelled` is treated as cancelled.
    pub fn from_raw(raw: Option<&str>) -> Self {
        match raw {
            None => Self::Unspecified,
            Some("cancelled") => Self::Cancelled,
            Some(other) => Self::Other(other.to_string()),
        }
    }

    /// Returns `true` if a booking in this state occupies a seat.
    pub fn occupies_seat(&self) -> bool {
        !matches!(self, Self::Cancelled)
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unspecified => write!(f, "unspecified"),
            Self::Cancelled => write!(f, "cancelled"),
            Self::Other(raw) => write!(f, "{}", raw),
        }
    }
}

/// A single reservation against the event type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingRecord {
    /// Start of the occurrence this booking is for. `None` when the provider
    /// sent a timestamp that could not be parsed; such bookings never match.
    pub start_at: Option<DateTime<Utc>>,
    /// Provider status.
    pub status: BookingStatus,
}

impl BookingRecord {
    /// Creates a booking record.
    pub fn new(start_at: DateTime<Utc>, status: BookingStatus) -> Self {
        Self {
            start_at: Some(start_at),
            status,
        }
    }

    /// Returns `true` if this booking takes a seat at the given occurrence.
    pub fn occupies(&self, occurrence: &RecurrenceWindow) -> bool {
        self.status.occupies_seat()
            && self
                .start_at
                .is_some_and(|start| same_utc_minute(start, occurrence.start_at))
    }
}

/// Compares two instants down to the minute in UTC.
///
/// Seconds and sub-second parts are ignored, so `10:00:59` and `10:00:00`
/// compare equal while `10:01:00` does not.
pub fn same_utc_minute(a: DateTime<Utc>, b: DateTime<Utc>) -> bool {
    a.year() == b.year()
        && a.month() == b.month()
        && a.day() == b.day()
        && a.hour() == b.hour()
        && a.minute() == b.minute()
}
