//! BookingProvider trait and implementations.
//!
//! - [`BookingProvider`] - what the resolver needs from a scheduling service
//! - [`tidycal::TidyCalProvider`] - the TidyCal implementation
//! - [`ProviderError`] - coded errors, split by the resolver into fetch and
//!   format failures
//!
//! ```text
//! ┌──────────────────┐   ┌──────────────────┐
//! │ TidyCal page feed│   │ TidyCal bookings │
//! └────────┬─────────┘   └────────┬─────────┘
//!          │                      │
//!          └──────┬───────────────┘
//!                 ▼
//!         ┌────────────────┐
//!         │ TidyCalProvider│  BookingProvider
//!         └───────┬────────┘
//!                 ▼
//!   Vec<RecurrenceWindow>, Vec<BookingRecord>
//! ```

pub mod error;
pub mod provider;
pub mod tidycal;

pub use error::{ProviderError, ProviderErrorCode, ProviderResult};
pub use provider::{BookingProvider, BoxFuture, ErrorProvider, FailingCall, StaticProvider};
