//! Display surfaces the poller renders to.
//!
//! A surface is made of up to three elements: the badge (container, carries
//! the color band and the updating mark), the counter (the number) and the
//! label ("spots left"). Any of them may be absent.

use std::io::Write;

use serde::{Deserialize, Serialize};
use tracing::warn;

use slotwatch_core::{ColorBand, SOLD_OUT_TEXT};

/// One drawable part of the spots badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayElement {
    Badge,
    Counter,
    Label,
}

impl DisplayElement {
    pub const ALL: [DisplayElement; 3] = [Self::Badge, Self::Counter, Self::Label];
}

/// Something the spots badge can be drawn on.
pub trait DisplaySurface {
    /// Returns `true` if the element exists on this surface.
    fn has(&self, element: DisplayElement) -> bool;

    /// Dims or restores the badge while a fetch is in flight.
    fn set_updating(&mut self, updating: bool);

    /// Number currently shown by the counter, if any.
    fn current_count(&self) -> Option<u32>;

    /// Shows a number. Clears the sold-out indicator.
    fn set_count(&mut self, count: u32);

    fn set_label(&mut self, label: &str);

    fn set_band(&mut self, band: ColorBand);

    /// Replaces the whole badge with the sold-out indicator.
    fn show_sold_out(&mut self);
}

const RESET: &str = "\x1b[0m";
const DIM: &str = "\x1b[2m";
const BOLD_RED: &str = "\x1b[1;31m";

fn band_color(band: ColorBand) -> &'static str {
    match band {
        ColorBand::Low => "\x1b[31m",
        ColorBand::Medium => "\x1b[33m",
        ColorBand::Normal => "",
    }
}

/// Draws the badge as a single, continuously rewritten terminal line.
pub struct TerminalSurface<W: Write> {
    out: W,
    elements: Vec<DisplayElement>,
    color: bool,
    updating: bool,
    count: Option<u32>,
    label: Option<String>,
    band: ColorBand,
    sold_out: bool,
}

impl<W: Write> TerminalSurface<W> {
    pub fn new(out: W, elements: Vec<DisplayElement>) -> Self {
        Self {
            out,
            elements,
            color: true,
            updating: false,
            count: None,
            label: None,
            band: ColorBand::Normal,
            sold_out: false,
        }
    }

    /// Builder: toggle ANSI colors.
    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    /// Text of the badge without escapes.
    pub fn line(&self) -> String {
        if self.sold_out {
            return SOLD_OUT_TEXT.to_string();
        }
        let count = self.count.map(|c| c.to_string());
        [count.as_deref(), self.label.as_deref()]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Terminates the current line so later output starts fresh.
    pub fn finish(&mut self) {
        if let Err(e) = writeln!(self.out) {
            warn!("failed to write to terminal: {}", e);
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn redraw(&mut self) {
        let line = self.line();
        let styled = if !self.color {
            line
        } else if self.sold_out {
            format!("{}{}{}", BOLD_RED, line, RESET)
        } else {
            let dim = if self.updating { DIM } else { "" };
            format!("{}{}{}{}", dim, band_color(self.band), line, RESET)
        };

        let result = write!(self.out, "\r\x1b[2K{}", styled).and_then(|()| self.out.flush());
        if let Err(e) = result {
            warn!("failed to write to terminal: {}", e);
        }
    }
}

impl<W: Write> DisplaySurface for TerminalSurface<W> {
    fn has(&self, element: DisplayElement) -> bool {
        self.elements.contains(&element)
    }

    fn set_updating(&mut self, updating: bool) {
        self.updating = updating;
        self.redraw();
    }

    fn current_count(&self) -> Option<u32> {
        self.count
    }

    fn set_count(&mut self, count: u32) {
        self.count = Some(count);
        self.sold_out = false;
        self.redraw();
    }

    fn set_label(&mut self, label: &str) {
        self.label = Some(label.to_string());
        self.redraw();
    }

    fn set_band(&mut self, band: ColorBand) {
        self.band = band;
        self.redraw();
    }

    fn show_sold_out(&mut self) {
        self.sold_out = true;
        self.redraw();
    }
}
