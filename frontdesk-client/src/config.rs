//! Client configuration

use std::time::Duration;

/// Default API location for local development
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";

/// Client configuration for connecting to the booking API
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Server base URL (e.g., "http://localhost:5000")
    pub base_url: String,

    /// Request timeout in seconds
    pub timeout: u64,

    /// Minimum time a loading indicator stays visible, in milliseconds
    pub min_spinner_ms: u64,

    /// Window in which an identical submit is treated as a double click, in milliseconds
    pub debounce_ms: u64,

    /// Page requested by a fresh availability search
    pub first_page: u32,
}

impl ClientConfig {
    /// Create a new client configuration
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: 30,
            min_spinner_ms: 1000,
            debounce_ms: 1000,
            first_page: 1,
        }
    }

    /// Load from `FRONTDESK_*` environment variables, falling back to defaults
    ///
    /// Binaries call `dotenv::dotenv()` first so a local `.env` is honoured.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            base_url: std::env::var("FRONTDESK_BASE_URL").unwrap_or(defaults.base_url),
            timeout: env_parse("FRONTDESK_TIMEOUT_SECS").unwrap_or(defaults.timeout),
            min_spinner_ms: env_parse("FRONTDESK_MIN_SPINNER_MS")
                .unwrap_or(defaults.min_spinner_ms),
            debounce_ms: env_parse("FRONTDESK_DEBOUNCE_MS").unwrap_or(defaults.debounce_ms),
            first_page: defaults.first_page,
        }
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = seconds;
        self
    }

    /// Set the minimum spinner duration (0 disables it)
    pub fn with_min_spinner_ms(mut self, ms: u64) -> Self {
        self.min_spinner_ms = ms;
        self
    }

    /// Set the double-submit window
    pub fn with_debounce_ms(mut self, ms: u64) -> Self {
        self.debounce_ms = ms;
        self
    }

    pub fn timeout_duration(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }

    pub fn min_spinner(&self) -> Duration {
        Duration::from_millis(self.min_spinner_ms)
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.trim().parse().ok())
}
