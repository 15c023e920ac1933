//! # Dashboard Configuration
//!
//! Backend location and request policy for the browser client.

use chrono::Duration;

/// Default backend base URL
pub const DEFAULT_API_BASE: &str = "http://127.0.0.1:8000";

/// Per-request timeout
pub const DEFAULT_TIMEOUT_MS: u32 = 10_000;

/// How long a fetched response is reused
pub const DEFAULT_CACHE_TTL_SECS: i64 = 30;

/// Body attribute that overrides the backend base URL
const API_BASE_ATTRIBUTE: &str = "data-api-base";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardConfig {
    pub api_base: String,
    pub timeout_ms: u32,
    pub cache_ttl: Duration,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
            cache_ttl: Duration::seconds(DEFAULT_CACHE_TTL_SECS),
        }
    }
}

impl DashboardConfig {
    /// Replace the backend base URL. Trailing slashes are dropped so
    /// endpoint paths can be appended directly.
    #[must_use]
    pub fn with_api_base(mut self, base: &str) -> Self {
        let base = base.trim().trim_end_matches('/');
        if !base.is_empty() {
            self.api_base = base.to_string();
        }
        self
    }

    /// Defaults, overridden by `<body data-api-base="...">` when present.
    pub fn from_document() -> Self {
        let override_base = web_sys::window()
            .and_then(|window| window.document())
            .and_then(|document| document.body())
            .and_then(|body| body.get_attribute(API_BASE_ATTRIBUTE));

        match override_base {
            Some(base) => Self::default().with_api_base(&base),
            None => Self::default(),
        }
    }

    pub fn endpoint_url(&self, endpoint: &str) -> String {
        format!("{}{}", self.api_base, endpoint)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = DashboardConfig::default();
        assert_eq!(config.api_base, "http://127.0.0.1:8000");
        assert_eq!(config.timeout_ms, 10_000);
        assert_eq!(config.cache_ttl, Duration::seconds(30));
    }

    #[test]
    fn test_api_base_override() {
        let config = DashboardConfig::default().with_api_base(" https://bi.example.com/ ");
        assert_eq!(config.endpoint_url("/kpis"), "https://bi.example.com/kpis");

        let unchanged = DashboardConfig::default().with_api_base("  ");
        assert_eq!(unchanged.api_base, DEFAULT_API_BASE);
    }
}
