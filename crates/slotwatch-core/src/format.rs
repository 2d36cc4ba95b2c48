//! Human-readable rendering of event dates.
//!
//! Formatting is a pure function of the instant and the target timezone so
//! it can be tested without a wall clock.

use chrono::{DateTime, Locale, Utc};
use chrono_tz::Tz;
use thiserror::Error;

/// Default timezone the event dates are rendered in.
pub const DEFAULT_TIMEZONE: &str = "Europe/Rome";

/// Day, full month name, year, then 24-hour time.
const EVENT_DATE_PATTERN: &str = "%-d %B %Y alle ore %H:%M";

/// Error returned for an unknown IANA timezone name.
#[derive(Debug, Error)]
#[error("unknown timezone `{name}`: {reason}")]
pub struct TimezoneError {
    name: String,
    reason: String,
}

/// Parses an IANA timezone name such as `Europe/Rome`.
pub fn parse_timezone(name: &str) -> Result<Tz, TimezoneError> {
    name.parse::<Tz>().map_err(|e| TimezoneError {
        name: name.to_string(),
        reason: e.to_string(),
    })
}

/// Renders an event start in Italian for the given timezone,
/// e.g. `5 novembre 2026 alle ore 18:30`.
pub fn format_event_date(at: DateTime<Utc>, tz: Tz) -> String {
    at.with_timezone(&tz)
        .format_localized(EVENT_DATE_PATTERN, Locale::it_IT)
        .to_string()
}
