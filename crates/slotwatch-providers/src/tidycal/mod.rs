//! TidyCal provider.
//!
//! Reads the recurrence windows of a group booking type from its public page
//! feed and the bookings made against it from the authenticated API.
//!
//! # Example
//!
//! ```ignore
//! use slotwatch_providers::tidycal::{TidyCalConfig, TidyCalProvider};
//!
//! let config = TidyCalConfig::new("benbugli/office-hours-group-session", "1728359", token)?;
//! let provider = TidyCalProvider::new(config)?;
//! let windows = provider.fetch_recurrence_windows().await?;
//! ```

mod client;
mod config;
mod provider;

pub use client::TidyCalClient;
pub use config::{DEFAULT_BASE_URL, TidyCalConfig};
pub use provider::{PROVIDER_NAME, TidyCalProvider};
