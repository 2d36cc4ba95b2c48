//! Core types: occurrences, bookings, availability, display rules, tracing

pub mod availability;
pub mod booking;
pub mod display;
pub mod format;
pub mod tracing;

pub use availability::{AvailabilityResult, count_booked, select_next_occurrence};
pub use booking::{BookingRecord, BookingStatus, RecurrenceWindow, same_utc_minute};
pub use display::{
    BadgeView, BandThresholds, ColorBand, CounterAnimation, SOLD_OUT_TEXT, ease_out_cubic,
    spots_label,
};
pub use format::{DEFAULT_TIMEZONE, TimezoneError, format_event_date, parse_timezone};
pub use self::tracing::{TracingConfig, TracingError, TracingOutputFormat, init_tracing};
