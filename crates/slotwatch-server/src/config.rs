//! Server configuration.

use std::net::{Ipv4Addr, SocketAddr};

use chrono_tz::Tz;
use slotwatch_protocol::DEFAULT_ENDPOINT_PATH;

/// Seats per occurrence unless configured otherwise.
pub const DEFAULT_CAPACITY: u32 = 8;

/// Settings for one resolution pass.
#[derive(Debug, Clone)]
pub struct ResolverConfig {
    /// Seats per occurrence; also the fail-open spots count.
    pub capacity: u32,
    /// Timezone the human-readable event date is rendered in.
    pub timezone: Tz,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            timezone: chrono_tz::Europe::Rome,
        }
    }
}

impl ResolverConfig {
    pub fn new(capacity: u32, timezone: Tz) -> Self {
        Self { capacity, timezone }
    }
}

/// HTTP server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to listen on.
    pub bind_address: SocketAddr,
    /// Path the availability endpoint is mounted on.
    pub path: String,
    /// Emit a span per request via `tower_http::trace`.
    pub enable_request_logging: bool,
    pub resolver: ResolverConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: SocketAddr::from((Ipv4Addr::LOCALHOST, 3000)),
            path: DEFAULT_ENDPOINT_PATH.to_string(),
            enable_request_logging: true,
            resolver: ResolverConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Creates a configuration listening on the given address.
    pub fn new(bind_address: SocketAddr) -> Self {
        Self {
            bind_address,
            ..Default::default()
        }
    }

    /// Builder: set the endpoint path.
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    /// Builder: set resolver settings.
    pub fn with_resolver(mut self, resolver: ResolverConfig) -> Self {
        self.resolver = resolver;
        self
    }

    /// Builder: toggle per-request tracing.
    pub fn with_request_logging(mut self, enabled: bool) -> Self {
        self.enable_request_logging = enabled;
        self
    }

    /// Checks values that would make the router unusable.
    pub fn validate(&self) -> Result<(), String> {
        if !self.path.starts_with('/') {
            return Err(format!("endpoint path `{}` must start with `/`", self.path));
        }
        if self.resolver.capacity == 0 {
            return Err("capacity must be at least 1".to_string());
        }
        Ok(())
    }
}
