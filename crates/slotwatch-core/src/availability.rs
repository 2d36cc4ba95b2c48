//! Occurrence selection and remaining-capacity computation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::booking::{BookingRecord, RecurrenceWindow};

/// Selects the earliest window that starts strictly after `now`.
///
/// Input order does not matter. Returns `None` when every window is in the
/// past (or exactly at `now`).
pub fn select_next_occurrence(
    windows: &[RecurrenceWindow],
    now: DateTime<Utc>,
) -> Option<RecurrenceWindow> {
    let mut upcoming: Vec<RecurrenceWindow> =
        windows.iter().filter(|w| w.is_after(now)).cloned().collect();
    upcoming.sort_by_key(|w| w.start_at);
    upcoming.into_iter().next()
}

/// Counts the bookings that occupy a seat at `occurrence`.
pub fn count_booked(bookings: &[BookingRecord], occurrence: &RecurrenceWindow) -> u32 {
    let count = bookings.iter().filter(|b| b.occupies(occurrence)).count();
    u32::try_from(count).unwrap_or(u32::MAX)
}

/// Remaining capacity for one occurrence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityResult {
    /// Seats still open, never negative.
    pub spots_left: u32,
    /// Start of the occurrence this result is for.
    pub event_date: Option<DateTime<Utc>>,
    /// `true` exactly when `spots_left` is zero.
    pub is_sold_out: bool,
    /// Configured capacity.
    pub max_spots: u32,
    /// Seats taken by non-cancelled bookings.
    pub booked_count: u32,
}

impl AvailabilityResult {
    /// Computes availability for an occurrence with `booked_count` seats taken.
    ///
    /// Overbooking saturates at zero spots left.
    pub fn compute(max_spots: u32, booked_count: u32, event_date: DateTime<Utc>) -> Self {
        let spots_left = max_spots.saturating_sub(booked_count);
        Self {
            spots_left,
            event_date: Some(event_date),
            is_sold_out: spots_left == 0,
            max_spots,
            booked_count,
        }
    }

    /// Computes availability for the next occurrence of a recurring event.
    ///
    /// Returns `None` when there is no upcoming occurrence.
    pub fn for_next_occurrence(
        windows: &[RecurrenceWindow],
        bookings: &[BookingRecord],
        max_spots: u32,
        now: DateTime<Utc>,
    ) -> Option<Self> {
        let occurrence = select_next_occurrence(windows, now)?;
        let booked = count_booked(bookings, &occurrence);
        Some(Self::compute(max_spots, booked, occurrence.start_at))
    }
}
