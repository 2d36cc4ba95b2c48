//! Display rules for the spots counter.
//!
//! These are pure: given a spots count they decide wording, color band and
//! animation frames. Surfaces that actually draw the counter live in the
//! client crate.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Text shown in place of the counter when no spots are left.
pub const SOLD_OUT_TEXT: &str = "Sold out";

/// Visual emphasis for the badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorBand {
    /// Few spots left.
    Low,
    /// Some spots left.
    Medium,
    /// Plenty of spots left.
    Normal,
}

/// Upper bounds (inclusive) for the low and medium bands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BandThresholds {
    pub low: u32,
    pub medium: u32,
}

impl Default for BandThresholds {
    fn default() -> Self {
        Self { low: 2, medium: 4 }
    }
}

impl BandThresholds {
    /// Picks the band for a spots count.
    pub fn band_for(&self, spots_left: u32) -> ColorBand {
        if spots_left <= self.low {
            ColorBand::Low
        } else if spots_left <= self.medium {
            ColorBand::Medium
        } else {
            ColorBand::Normal
        }
    }
}

/// Returns `"spot left"` for exactly one spot, `"spots left"` otherwise.
pub fn spots_label(spots_left: u32) -> &'static str {
    if spots_left == 1 {
        "spot left"
    } else {
        "spots left"
    }
}

/// What the badge should show after an update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BadgeView {
    /// The sold-out indicator replaces the number.
    SoldOut,
    /// A number with its wording and band.
    Available {
        spots_left: u32,
        label: &'static str,
        band: ColorBand,
    },
}

impl BadgeView {
    /// Builds the view for an availability snapshot.
    pub fn new(spots_left: u32, is_sold_out: bool, thresholds: &BandThresholds) -> Self {
        if is_sold_out {
            Self::SoldOut
        } else {
            Self::Available {
                spots_left,
                label: spots_label(spots_left),
                band: thresholds.band_for(spots_left),
            }
        }
    }
}

/// Cubic ease-out: fast start, gentle landing.
pub fn ease_out_cubic(progress: f64) -> f64 {
    let p = progress.clamp(0.0, 1.0);
    1.0 - (1.0 - p).powi(3)
}

/// Tween of the displayed integer between two values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CounterAnimation {
    pub from: u32,
    pub to: u32,
    pub duration: Duration,
}

impl CounterAnimation {
    pub fn new(from: u32, to: u32, duration: Duration) -> Self {
        Self { from, to, duration }
    }

    /// Value to display `elapsed` after the animation started.
    pub fn value_at(&self, elapsed: Duration) -> u32 {
        if self.duration.is_zero() || elapsed >= self.duration {
            return self.to;
        }
        let progress = elapsed.as_secs_f64() / self.duration.as_secs_f64();
        let diff = f64::from(self.to) - f64::from(self.from);
        let value = (f64::from(self.from) + diff * ease_out_cubic(progress)).round();
        value.max(0.0) as u32
    }

    /// Returns `true` once the final value has been reached.
    pub fn is_finished(&self, elapsed: Duration) -> bool {
        elapsed >= self.duration
    }
}
