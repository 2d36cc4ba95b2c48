//! HTTP server wiring: router, CORS, request tracing, graceful shutdown.

use std::future::Future;
use std::sync::Arc;

use axum::Router;
use axum::http::{Method, header};
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use slotwatch_providers::BookingProvider;

use crate::config::ServerConfig;
use crate::error::{ServerError, ServerResult};
use crate::handler::{AppState, create_router};
use crate::resolver::AvailabilityResolver;

/// The availability HTTP server.
pub struct AvailabilityServer {
    config: ServerConfig,
    state: AppState,
}

impl AvailabilityServer {
    /// Creates a server resolving against `provider`.
    pub fn new(config: ServerConfig, provider: Arc<dyn BookingProvider>) -> ServerResult<Self> {
        config.validate().map_err(ServerError::config)?;

        let resolver = AvailabilityResolver::new(provider, config.resolver.clone());
        let state = AppState::new(resolver);

        Ok(Self { config, state })
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Builds the router with CORS and, if enabled, request tracing.
    pub fn build_router(&self) -> Router {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([Method::GET, Method::OPTIONS])
            .allow_headers([header::CONTENT_TYPE]);

        let mut router = create_router(self.state.clone(), &self.config.path).layer(cors);

        if self.config.enable_request_logging {
            router = router.layer(TraceLayer::new_for_http());
        }

        router
    }

    /// Binds the configured address and serves until `shutdown` completes.
    pub async fn serve_until<F>(self, shutdown: F) -> ServerResult<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let address = self.config.bind_address;
        let listener = TcpListener::bind(address)
            .await
            .map_err(|source| ServerError::Bind {
                address: address.to_string(),
                source,
            })?;

        self.serve_on(listener, shutdown).await
    }

    /// Serves on an already bound listener until `shutdown` completes.
    pub async fn serve_on<F>(self, listener: TcpListener, shutdown: F) -> ServerResult<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let router = self.build_router();

        info!(
            address = %listener.local_addr().map_err(ServerError::Serve)?,
            path = %self.config.path,
            capacity = self.config.resolver.capacity,
            "availability server listening"
        );

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(ServerError::Serve)?;

        info!("availability server stopped");
        Ok(())
    }
}
