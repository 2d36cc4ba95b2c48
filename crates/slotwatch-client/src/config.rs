//! Application configuration.
//!
//! All settings live in a single `config.toml` file at
//! `~/.config/slotwatch/config.toml` by default. Every section and key is
//! optional; defaults match the office-hours group session on TidyCal.
//!
//! ```toml
//! [tidycal]
//! api_token = "env::TIDYCAL_API_TOKEN"
//!
//! [server]
//! bind_address = "0.0.0.0:3000"
//!
//! [poller]
//! api_url = "https://spots.example.com/api/tidycal-spots"
//! elements = ["badge", "counter", "label"]
//! ```

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use slotwatch_core::{BandThresholds, parse_timezone};
use slotwatch_protocol::DEFAULT_ENDPOINT_PATH;
use slotwatch_providers::tidycal::{DEFAULT_BASE_URL, TidyCalConfig};
use slotwatch_server::{DEFAULT_CAPACITY, ResolverConfig, ServerConfig};

use crate::poller::PollerConfig;
use crate::render::RenderConfig;
use crate::secret;
use crate::surface::DisplayElement;

/// Configuration for slotwatch.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Upstream booking service.
    pub tidycal: TidyCalSettings,

    /// HTTP resolver.
    pub server: ServerSettings,

    /// Display poller.
    pub poller: PollerSettings,
}

/// TidyCal settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TidyCalSettings {
    pub base_url: String,

    /// `<user>/<booking-type>` path of the public booking page.
    pub page_slug: String,

    /// Booking type identifier, as a string.
    pub booking_type_id: String,

    /// Personal access token (supports `pass::` and `env::` prefixes).
    pub api_token: Option<String>,

    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for TidyCalSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            page_slug: "benbugli/office-hours-group-session".to_string(),
            booking_type_id: "1728359".to_string(),
            api_token: None,
            timeout_secs: 10,
        }
    }
}

impl TidyCalSettings {
    /// Converts to provider configuration, resolving the API token.
    pub fn to_provider_config(&self) -> Result<TidyCalConfig, String> {
        let raw_token = self.api_token.as_deref().ok_or_else(|| {
            format!(
                "TidyCal API token not found. Add to {}:\n  \
                 [tidycal]\n  \
                 api_token = \"env::TIDYCAL_API_TOKEN\"",
                AppConfig::default_path().display()
            )
        })?;
        let token = secret::resolve_api_token(raw_token)
            .map_err(|e| format!("failed to resolve api_token: {}", e))?;

        let base_url = Url::parse(&self.base_url)
            .map_err(|e| format!("invalid base_url `{}`: {}", self.base_url, e))?;

        let config = TidyCalConfig::new(&self.page_slug, &self.booking_type_id, token)?
            .with_base_url(base_url)
            .with_timeout(Duration::from_secs(self.timeout_secs));
        config.validate()?;

        Ok(config)
    }
}

/// HTTP resolver settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub bind_address: String,

    /// Path the endpoint is mounted on.
    pub path: String,

    /// Seats per occurrence.
    pub capacity: u32,

    /// IANA timezone for `nextEventFormatted`.
    pub timezone: String,

    /// Trace every request.
    pub request_logging: bool,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:3000".to_string(),
            path: DEFAULT_ENDPOINT_PATH.to_string(),
            capacity: DEFAULT_CAPACITY,
            timezone: slotwatch_core::DEFAULT_TIMEZONE.to_string(),
            request_logging: true,
        }
    }
}

impl ServerSettings {
    /// Resolver settings alone, for one-shot checks.
    pub fn to_resolver_config(&self) -> Result<ResolverConfig, String> {
        let timezone = parse_timezone(&self.timezone).map_err(|e| e.to_string())?;
        Ok(ResolverConfig::new(self.capacity, timezone))
    }

    /// Converts to server configuration. `bind` overrides `bind_address`.
    pub fn to_server_config(&self, bind: Option<&str>) -> Result<ServerConfig, String> {
        let raw = bind.unwrap_or(&self.bind_address);
        let address: SocketAddr = raw
            .parse()
            .map_err(|e| format!("invalid bind address `{}`: {}", raw, e))?;

        let config = ServerConfig::new(address)
            .with_path(&self.path)
            .with_request_logging(self.request_logging)
            .with_resolver(self.to_resolver_config()?);
        config.validate()?;

        Ok(config)
    }
}

/// Display poller settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PollerSettings {
    /// Full URL of the availability endpoint.
    pub api_url: String,

    pub interval_secs: u64,

    /// Spots shown when the resolver cannot be read.
    pub fallback_spots: u32,

    /// Counter animation length in milliseconds.
    pub animation_ms: u64,

    pub low_threshold: u32,
    pub medium_threshold: u32,

    /// Elements the terminal surface draws.
    pub elements: Vec<DisplayElement>,
}

impl Default for PollerSettings {
    fn default() -> Self {
        Self {
            api_url: format!("http://127.0.0.1:3000{}", DEFAULT_ENDPOINT_PATH),
            interval_secs: 300,
            fallback_spots: DEFAULT_CAPACITY,
            animation_ms: 500,
            low_threshold: 2,
            medium_threshold: 4,
            elements: DisplayElement::ALL.to_vec(),
        }
    }
}

impl PollerSettings {
    pub fn api_url(&self) -> Result<Url, String> {
        Url::parse(&self.api_url).map_err(|e| format!("invalid api_url `{}`: {}", self.api_url, e))
    }

    pub fn to_poller_config(&self) -> PollerConfig {
        PollerConfig::new(Duration::from_secs(self.interval_secs))
    }

    pub fn to_render_config(&self) -> RenderConfig {
        RenderConfig {
            fallback_spots: self.fallback_spots,
            animation: Duration::from_millis(self.animation_ms),
            thresholds: BandThresholds {
                low: self.low_threshold,
                medium: self.medium_threshold,
            },
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        self.api_url()?;
        if self.interval_secs == 0 {
            return Err("poller interval_secs must be greater than zero".to_string());
        }
        if self.low_threshold > self.medium_threshold {
            return Err(format!(
                "low_threshold ({}) must not exceed medium_threshold ({})",
                self.low_threshold, self.medium_threshold
            ));
        }
        Ok(())
    }
}

impl AppConfig {
    /// Loads configuration from the default path, or defaults if absent.
    pub fn load() -> Result<Self, String> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Loads configuration from a specific path.
    pub fn load_from(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("failed to read config {}: {}", path.display(), e))?;
        toml::from_str(&content).map_err(|e| format!("failed to parse config: {}", e))
    }

    /// Returns the default configuration file path.
    pub fn default_path() -> PathBuf {
        Self::default_config_dir().join("config.toml")
    }

    /// Returns the default configuration directory.
    pub fn default_config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("slotwatch")
    }
}
