//! Upstream connection settings.

use std::time::Duration;

use crate::backoff::BackoffPolicy;

/// Production base URL of the upstream API.
pub const DEFAULT_BASE_URL: &str = "https://api.live.prod.theadultswim.com/helldivers2";

/// `User-Agent` sent with every request.
pub const DEFAULT_USER_AGENT: &str = "High-Command API/1.0";

/// Settings for [`UpstreamClient`](crate::UpstreamClient) and its transport.
#[derive(Debug, Clone)]
pub struct UpstreamConfig {
    pub base_url: String,
    pub user_agent: String,
    /// Sent as `X-Super-Client`.
    pub client_name: String,
    /// Sent as `X-Super-Contact`.
    pub contact: String,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Minimum spacing between any two requests.
    pub min_interval: Duration,
    pub backoff: BackoffPolicy,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            client_name: "high-command".to_string(),
            contact: "unknown".to_string(),
            timeout: Duration::from_secs(30),
            min_interval: Duration::from_secs(2),
            backoff: BackoffPolicy::default(),
        }
    }
}

/// Resolve a configured base URL. Empty values and the placeholder `NA`
/// select [`DEFAULT_BASE_URL`]; a trailing slash is dropped.
pub fn resolve_base_url(raw: Option<&str>) -> String {
    match raw.map(str::trim) {
        None | Some("") => DEFAULT_BASE_URL.to_string(),
        Some(s) if s.eq_ignore_ascii_case("NA") => DEFAULT_BASE_URL.to_string(),
        Some(s) => s.trim_end_matches('/').to_string(),
    }
}
