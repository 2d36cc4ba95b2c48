//! HTTP handlers for the availability endpoint.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use tracing::debug;

use slotwatch_protocol::ErrorBody;

use crate::resolver::AvailabilityResolver;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub resolver: Arc<AvailabilityResolver>,
}

impl AppState {
    pub fn new(resolver: AvailabilityResolver) -> Self {
        Self {
            resolver: Arc::new(resolver),
        }
    }
}

/// Routes `GET` and `OPTIONS` on `path`; every other method gets a 405.
///
/// `HEAD` needs its own route: axum would otherwise answer it with the
/// `GET` handler.
pub fn create_router(state: AppState, path: &str) -> Router {
    Router::new()
        .route(
            path,
            get(get_availability)
                .head(method_not_allowed)
                .options(preflight)
                .fallback(method_not_allowed),
        )
        .with_state(state)
}

/// `GET`: resolve availability, failing open with a 500.
async fn get_availability(State(state): State<AppState>) -> Response {
    let body = state.resolver.respond().await;
    let status =
        StatusCode::from_u16(body.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(body)).into_response()
}

/// `OPTIONS`: empty 200. When the server's CORS layer is installed it
/// answers `OPTIONS` itself and this handler is not reached.
async fn preflight() -> StatusCode {
    debug!("plain OPTIONS request");
    StatusCode::OK
}

async fn method_not_allowed() -> (StatusCode, Json<ErrorBody>) {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(ErrorBody::method_not_allowed()),
    )
}
