//! JSON bodies exchanged between the availability resolver and its pollers.
//!
//! The resolver answers `GET` with one of three shapes:
//!
//! - [`AvailableBody`]: spots for the next occurrence
//! - [`NoUpcomingBody`]: no future occurrence, reported as sold out
//! - [`DegradedBody`]: upstream failure, reported as fully available (HTTP 500)
//!
//! Pollers only need [`AvailabilitySnapshot`], which decodes from all three.

mod error;
mod types;

pub use error::{ProtocolError, ProtocolResult};
pub use types::{
    AvailabilityResponse, AvailabilitySnapshot, AvailableBody, DegradedBody, ErrorBody,
    FETCH_FAILED_ERROR, METHOD_NOT_ALLOWED_ERROR, NO_UPCOMING_MESSAGE, NoUpcomingBody,
};

/// Path the resolver is mounted on unless configured otherwise.
pub const DEFAULT_ENDPOINT_PATH: &str = "/api/tidycal-spots";
