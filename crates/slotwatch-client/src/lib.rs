//! CLI, configuration, display poller and terminal surface.
//!
//! This crate provides the `slotwatch` command-line interface.

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod poller;
pub mod render;
pub mod secret;
pub mod surface;

pub use api::AvailabilityClient;
pub use cli::Cli;
pub use error::{ClientError, ClientResult};
pub use poller::{Poller, PollerCommand, PollerConfig, PollerHandle};
pub use render::{RenderConfig, SpotsWidget, render};
pub use surface::{DisplayElement, DisplaySurface, TerminalSurface};
