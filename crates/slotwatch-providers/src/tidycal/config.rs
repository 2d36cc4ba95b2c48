//! TidyCal provider configuration.

use std::time::Duration;

use url::Url;

/// Public TidyCal host.
pub const DEFAULT_BASE_URL: &str = "https://tidycal.com/";

/// Configuration for a single TidyCal booking type.
#[derive(Debug, Clone)]
pub struct TidyCalConfig {
    /// Scheme and host of the TidyCal instance. Must end with `/` if it
    /// carries a path prefix.
    pub base_url: Url,
    /// `<user>/<booking-type>` path of the public booking page.
    pub page_slug: String,
    /// Numeric booking type identifier used by the bookings API.
    pub booking_type_id: String,
    /// Personal access token for the bookings API.
    pub api_token: String,
    /// Timeout applied to each upstream request.
    pub timeout: Duration,
}

impl TidyCalConfig {
    /// Creates a configuration against the public TidyCal host.
    pub fn new(
        page_slug: impl Into<String>,
        booking_type_id: impl Into<String>,
        api_token: impl Into<String>,
    ) -> Result<Self, String> {
        let base_url = Url::parse(DEFAULT_BASE_URL).map_err(|e| e.to_string())?;
        Ok(Self {
            base_url,
            page_slug: page_slug.into(),
            booking_type_id: booking_type_id.into(),
            api_token: api_token.into(),
            timeout: Duration::from_secs(10),
        })
    }

    /// Builder: point at another host (tests, proxies).
    pub fn with_base_url(mut self, base_url: Url) -> Self {
        self.base_url = base_url;
        self
    }

    /// Builder: set the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Checks that every required field is present.
    pub fn validate(&self) -> Result<(), String> {
        if self.page_slug.trim_matches('/').is_empty() {
            return Err("page_slug must not be empty".to_string());
        }
        if self.booking_type_id.trim().is_empty() {
            return Err("booking_type_id must not be empty".to_string());
        }
        if self.api_token.trim().is_empty() {
            return Err("api_token must not be empty".to_string());
        }
        if self.timeout.is_zero() {
            return Err("timeout must be greater than zero".to_string());
        }
        Ok(())
    }

    /// URL of the public page feed: `<base>/<slug>?json`.
    pub fn page_feed_url(&self) -> Result<Url, String> {
        let path = self
            .page_slug
            .trim_matches('/')
            .split('/')
            .map(|segment| urlencoding::encode(segment).into_owned())
            .collect::<Vec<_>>()
            .join("/");
        let mut url = self
            .base_url
            .join(&path)
            .map_err(|e| format!("invalid page slug `{}`: {}", self.page_slug, e))?;
        url.set_query(Some("json"));
        Ok(url)
    }

    /// URL of the bookings listing filtered by booking type.
    pub fn bookings_url(&self) -> Result<Url, String> {
        let mut url = self
            .base_url
            .join("api/bookings")
            .map_err(|e| format!("invalid base URL `{}`: {}", self.base_url, e))?;
        url.query_pairs_mut()
            .append_pair("booking_type_id", &self.booking_type_id);
        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> TidyCalConfig {
        TidyCalConfig::new("benbugli/office-hours-group-session", "1728359", "token").unwrap()
    }

    #[test]
    fn page_feed_url() {
        assert_eq!(
            config().page_feed_url().unwrap().as_str(),
            "https://tidycal.com/benbugli/office-hours-group-session?json"
        );
    }

    #[test]
    fn page_feed_url_encodes_segments() {
        let mut config = config();
        config.page_slug = "/ben bugli/office hours/".to_string();
        assert_eq!(
            config.page_feed_url().unwrap().as_str(),
            "https://tidycal.com/ben%20bugli/office%20hours?json"
        );
    }

    #[test]
    fn bookings_url() {
        assert_eq!(
            config().bookings_url().unwrap().as_str(),
            "https://tidycal.com/api/bookings?booking_type_id=1728359"
        );
    }

    #[test]
    fn custom_base_url() {
        let config = config().with_base_url(Url::parse("http://127.0.0.1:9000").unwrap());
        assert_eq!(
            config.bookings_url().unwrap().as_str(),
            "http://127.0.0.1:9000/api/bookings?booking_type_id=1728359"
        );
    }

    #[test]
    fn validate_rejects_missing_fields() {
        assert!(config().validate().is_ok());

        let mut missing_token = config();
        missing_token.api_token = "  ".to_string();
        assert!(missing_token.validate().unwrap_err().contains("api_token"));

        let mut missing_id = config();
        missing_id.booking_type_id = String::new();
        assert!(missing_id.validate().unwrap_err().contains("booking_type_id"));

        let mut missing_slug = config();
        missing_slug.page_slug = "/".to_string();
        assert!(missing_slug.validate().unwrap_err().contains("page_slug"));

        let no_timeout = config().with_timeout(Duration::ZERO);
        assert!(no_timeout.validate().is_err());
    }
}
