//! BookingProvider trait definition.
//!
//! A provider knows how to read two things for one fixed event type: the
//! list of scheduled occurrences and the bookings made against it.

use std::future::Future;
use std::pin::Pin;

use slotwatch_core::{BookingRecord, RecurrenceWindow};

use crate::error::{ProviderError, ProviderResult};

/// A boxed future for async trait methods.
///
/// Boxing keeps the trait object-safe so the resolver can hold a
/// `dyn BookingProvider`.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Source of occurrences and bookings for a single event type.
///
/// Implementations perform at most one upstream request per call and never
/// retry.
pub trait BookingProvider: Send + Sync {
    /// Returns the name of this provider (e.g. "tidycal").
    fn name(&self) -> &str;

    /// Fetches every scheduled occurrence, past and future.
    fn fetch_recurrence_windows(&self) -> BoxFuture<'_, ProviderResult<Vec<RecurrenceWindow>>>;

    /// Fetches every booking for the event type.
    fn fetch_bookings(&self) -> BoxFuture<'_, ProviderResult<Vec<BookingRecord>>>;
}

/// A provider serving fixed data.
///
/// Used for tests and dry runs without an upstream.
#[derive(Debug, Clone, Default)]
pub struct StaticProvider {
    windows: Vec<RecurrenceWindow>,
    bookings: Vec<BookingRecord>,
}

impl StaticProvider {
    pub fn new(windows: Vec<RecurrenceWindow>, bookings: Vec<BookingRecord>) -> Self {
        Self { windows, bookings }
    }
}

impl BookingProvider for StaticProvider {
    fn name(&self) -> &str {
        "static"
    }

    fn fetch_recurrence_windows(&self) -> BoxFuture<'_, ProviderResult<Vec<RecurrenceWindow>>> {
        let windows = self.windows.clone();
        Box::pin(async move { Ok(windows) })
    }

    fn fetch_bookings(&self) -> BoxFuture<'_, ProviderResult<Vec<BookingRecord>>> {
        let bookings = self.bookings.clone();
        Box::pin(async move { Ok(bookings) })
    }
}

/// Which call of a provider should fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailingCall {
    RecurrenceWindows,
    Bookings,
}

/// A provider that fails one of its calls.
///
/// The other call succeeds with the data it was given, which lets callers
/// exercise failures at either step.
#[derive(Debug)]
pub struct ErrorProvider {
    failing: FailingCall,
    error: ProviderError,
    inner: StaticProvider,
}

impl ErrorProvider {
    /// Creates a provider whose `failing` call returns `error`.
    pub fn new(failing: FailingCall, error: ProviderError) -> Self {
        Self {
            failing,
            error,
            inner: StaticProvider::default(),
        }
    }

    /// Data returned by the call that does not fail.
    pub fn with_data(mut self, inner: StaticProvider) -> Self {
        self.inner = inner;
        self
    }
}

impl BookingProvider for ErrorProvider {
    fn name(&self) -> &str {
        "error"
    }

    fn fetch_recurrence_windows(&self) -> BoxFuture<'_, ProviderResult<Vec<RecurrenceWindow>>> {
        if self.failing == FailingCall::RecurrenceWindows {
            let error = self.error.duplicate();
            return Box::pin(async move { Err(error) });
        }
        self.inner.fetch_recurrence_windows()
    }

    fn fetch_bookings(&self) -> BoxFuture<'_, ProviderResult<Vec<BookingRecord>>> {
        if self.failing == FailingCall::Bookings {
            let error = self.error.duplicate();
            return Box::pin(async move { Err(error) });
        }
        self.inner.fetch_bookings()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use slotwatch_core::BookingStatus;

    #[tokio::test]
    async fn static_provider_returns_data() {
        let at = Utc.with_ymd_and_hms(2026, 10, 23, 16, 0, 0).unwrap();
        let provider = StaticProvider::new(
            vec![RecurrenceWindow::new(at)],
            vec![BookingRecord::new(at, BookingStatus::Unspecified)],
        );

        assert_eq!(provider.fetch_recurrence_windows().await.unwrap().len(), 1);
        assert_eq!(provider.fetch_bookings().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn error_provider_fails_selected_call() {
        let provider = ErrorProvider::new(
            FailingCall::Bookings,
            ProviderError::http_status(503, "unavailable"),
        );

        assert!(provider.fetch_recurrence_windows().await.is_ok());
        let err = provider.fetch_bookings().await.unwrap_err();
        assert_eq!(err.status(), Some(503));
    }
}
