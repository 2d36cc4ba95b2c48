//! Rendering availability onto a display surface.

use std::time::Duration;

use tokio::time::Instant;
use tracing::{debug, info, warn};

use slotwatch_core::{BadgeView, BandThresholds, CounterAnimation};
use slotwatch_protocol::AvailabilitySnapshot;

use crate::api::AvailabilityClient;
use crate::error::ClientResult;
use crate::surface::{DisplayElement, DisplaySurface};

/// How snapshots are drawn.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Spots shown when the resolver cannot be read, and the animation
    /// start when the counter is empty.
    pub fallback_spots: u32,
    /// Counter animation length. Zero jumps straight to the target.
    pub animation: Duration,
    /// Delay between animation frames.
    pub frame_interval: Duration,
    pub thresholds: BandThresholds,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            fallback_spots: slotwatch_server::DEFAULT_CAPACITY,
            animation: Duration::from_millis(500),
            frame_interval: Duration::from_millis(16),
            thresholds: BandThresholds::default(),
        }
    }
}

/// Draws one snapshot.
///
/// Without a badge nothing is drawn. A missing counter or label only skips
/// that element.
pub async fn render<S: DisplaySurface>(
    surface: &mut S,
    snapshot: AvailabilitySnapshot,
    config: &RenderConfig,
) {
    if !surface.has(DisplayElement::Badge) {
        warn!("spots badge not found, skipping render");
        return;
    }

    match BadgeView::new(snapshot.spots_left, snapshot.is_sold_out, &config.thresholds) {
        BadgeView::SoldOut => surface.show_sold_out(),
        BadgeView::Available {
            spots_left,
            label,
            band,
        } => {
            if surface.has(DisplayElement::Counter) {
                let from = surface.current_count().unwrap_or(config.fallback_spots);
                animate_counter(surface, from, spots_left, config).await;
            } else {
                debug!("no counter element, skipping number");
            }

            if surface.has(DisplayElement::Label) {
                surface.set_label(label);
            }

            surface.set_band(band);
        }
    }
}

async fn animate_counter<S: DisplaySurface>(
    surface: &mut S,
    from: u32,
    to: u32,
    config: &RenderConfig,
) {
    let animation = CounterAnimation::new(from, to, config.animation);
    let start = Instant::now();

    loop {
        let elapsed = start.elapsed();
        surface.set_count(animation.value_at(elapsed));
        if animation.is_finished(elapsed) {
            break;
        }
        tokio::time::sleep(config.frame_interval).await;
    }
}

/// A surface bound to the resolver it displays.
pub struct SpotsWidget<S> {
    client: AvailabilityClient,
    surface: S,
    config: RenderConfig,
}

impl<S: DisplaySurface> SpotsWidget<S> {
    pub fn new(client: AvailabilityClient, surface: S, config: RenderConfig) -> Self {
        Self {
            client,
            surface,
            config,
        }
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// One poll cycle: mark updating, fetch, render, clear the mark.
    pub async fn update(&mut self) {
        let has_badge = self.surface.has(DisplayElement::Badge);
        if has_badge {
            self.surface.set_updating(true);
        }

        let fetched = self.client.fetch().await;
        self.apply(fetched).await;

        if has_badge {
            self.surface.set_updating(false);
        }
    }

    /// Renders a fetch outcome, substituting the fallback on failure.
    pub async fn apply(&mut self, fetched: ClientResult<AvailabilitySnapshot>) {
        let snapshot = match fetched {
            Ok(snapshot) => {
                info!(
                    spots_left = snapshot.spots_left,
                    sold_out = snapshot.is_sold_out,
                    "spots updated"
                );
                snapshot
            }
            Err(e) => {
                warn!(
                    error = %e,
                    url = %self.client.url(),
                    fallback = self.config.fallback_spots,
                    "failed to fetch spots, showing fallback"
                );
                AvailabilitySnapshot::fallback(self.config.fallback_spots)
            }
        };

        render(&mut self.surface, snapshot, &self.config).await;
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use slotwatch_core::ColorBand;

    /// Surface that records every call.
    #[derive(Debug, Default)]
    pub(crate) struct RecordingSurface {
        pub elements: Vec<DisplayElement>,
        pub counts: Vec<u32>,
        pub label: Option<String>,
        pub band: Option<ColorBand>,
        pub sold_out: bool,
        pub updating: Vec<bool>,
    }

    impl RecordingSurface {
        pub(crate) fn with(elements: &[DisplayElement]) -> Self {
            Self {
                elements: elements.to_vec(),
                ..Default::default()
            }
        }

        pub(crate) fn full() -> Self {
            Self::with(&DisplayElement::ALL)
        }
    }

    impl DisplaySurface for RecordingSurface {
        fn has(&self, element: DisplayElement) -> bool {
            self.elements.contains(&element)
        }
        fn set_updating(&mut self, updating: bool) {
            self.updating.push(updating);
        }
        fn current_count(&self) -> Option<u32> {
            self.counts.last().copied()
        }
        fn set_count(&mut self, count: u32) {
            self.counts.push(count);
            self.sold_out = false;
        }
        fn set_label(&mut self, label: &str) {
            self.label = Some(label.to_string());
        }
        fn set_band(&mut self, band: ColorBand) {
            self.band = Some(band);
        }
        fn show_sold_out(&mut self) {
            self.sold_out = true;
        }
    }

    fn instant() -> RenderConfig {
        RenderConfig {
            animation: Duration::ZERO,
            ..Default::default()
        }
    }

    fn snapshot(spots_left: u32, is_sold_out: bool) -> AvailabilitySnapshot {
        AvailabilitySnapshot {
            spots_left,
            is_sold_out,
        }
    }

    #[tokio::test]
    async fn renders_count_label_and_band() {
        let mut surface = RecordingSurface::full();
        render(&mut surface, snapshot(3, false), &instant()).await;

        assert_eq!(surface.counts, vec![3]);
        assert_eq!(surface.label.as_deref(), Some("spots left"));
        assert_eq!(surface.band, Some(ColorBand::Medium));
        assert!(!surface.sold_out);
    }

    #[tokio::test]
    async fn one_spot_is_singular_and_low() {
        let mut surface = RecordingSurface::full();
        render(&mut surface, snapshot(1, false), &instant()).await;

        assert_eq!(surface.label.as_deref(), Some("spot left"));
        assert_eq!(surface.band, Some(ColorBand::Low));
    }

    #[tokio::test]
    async fn sold_out_overrides_number() {
        let mut surface = RecordingSurface::full();
        render(&mut surface, snapshot(0, true), &instant()).await;

        assert!(surface.sold_out);
        assert!(surface.counts.is_empty());
        assert_eq!(surface.label, None);
    }

    #[tokio::test]
    async fn missing_badge_skips_render() {
        let mut surface = RecordingSurface::with(&[DisplayElement::Counter, DisplayElement::Label]);
        render(&mut surface, snapshot(5, false), &instant()).await;

        assert!(surface.counts.is_empty());
        assert_eq!(surface.label, None);
        assert_eq!(surface.band, None);
    }

    #[tokio::test]
    async fn missing_counter_keeps_label_and_band() {
        let mut surface = RecordingSurface::with(&[DisplayElement::Badge, DisplayElement::Label]);
        render(&mut surface, snapshot(6, false), &instant()).await;

        assert!(surface.counts.is_empty());
        assert_eq!(surface.label.as_deref(), Some("spots left"));
        assert_eq!(surface.band, Some(ColorBand::Normal));
    }

    #[tokio::test(start_paused = true)]
    async fn counter_eases_from_fallback() {
        let mut surface = RecordingSurface::full();
        render(&mut surface, snapshot(2, false), &RenderConfig::default()).await;

        assert_eq!(surface.counts.first(), Some(&8));
        assert_eq!(surface.counts.last(), Some(&2));
        assert!(surface.counts.len() > 2);
        assert!(surface.counts.windows(2).all(|w| w[0] >= w[1]));
    }

    #[tokio::test(start_paused = true)]
    async fn counter_eases_from_previous_value() {
        let mut surface = RecordingSurface::full();
        surface.counts.push(1);
        render(&mut surface, snapshot(7, false), &RenderConfig::default()).await;

        assert_eq!(surface.counts[1], 1);
        assert_eq!(surface.counts.last(), Some(&7));
        assert!(surface.counts[1..].windows(2).all(|w| w[0] <= w[1]));
    }
}
