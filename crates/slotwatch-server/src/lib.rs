//! Availability resolver served over HTTP.
//!
//! This crate answers `GET /api/tidycal-spots` with the number of seats left
//! in the next occurrence of a recurring group session:
//! - [`AvailabilityResolver`] reads occurrences and bookings from a
//!   [`BookingProvider`](slotwatch_providers::BookingProvider)
//! - [`AvailabilityServer`] mounts it behind axum with permissive CORS
//! - upstream failures fail open: HTTP 500 with full capacity
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use slotwatch_providers::StaticProvider;
//! use slotwatch_server::{AvailabilityServer, ServerConfig, SignalHandler};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let server = AvailabilityServer::new(ServerConfig::default(), Arc::new(StaticProvider::default()))?;
//!     let signals = SignalHandler::new();
//!     signals.spawn_listener();
//!     server.serve_until(signals.shutdown().wait()).await?;
//!     Ok(())
//! }
//! ```

mod config;
mod error;
mod handler;
mod resolver;
mod server;
mod signals;

pub use config::{DEFAULT_CAPACITY, ResolverConfig, ServerConfig};
pub use error::{ResolveError, ResolveResult, ServerError, ServerResult};
pub use handler::{AppState, create_router};
pub use resolver::{AvailabilityResolver, Resolution};
pub use server::AvailabilityServer;
pub use signals::{ShutdownSignal, SignalHandler};
