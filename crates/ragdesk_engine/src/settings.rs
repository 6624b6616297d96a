use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8001/api";
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(5);

/// Client context, built once at start-up.
#[derive(Debug, Clone)]
pub struct ClientSettings {
    /// Base of every endpoint, e.g. `http://host/api`.
    pub base_url: String,
    pub poll_interval: Duration,
    /// `None` leaves timeouts to the transport defaults.
    pub request_timeout: Option<Duration>,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            poll_interval: DEFAULT_POLL_INTERVAL,
            request_timeout: None,
        }
    }
}

impl ClientSettings {
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }
}
