use std::collections::BTreeMap;
use std::time::Duration;

use serde::Deserialize;

const DEFAULT_TIMEOUT_SECS: f64 = 15.0;

/// Per-run HTTP options, read from the `request` block of the settings file.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct RequestConfig {
    /// Single user agent string.
    pub user_agent: Option<String>,
    /// Pool to pick a random user agent from; overrides `user_agent`.
    pub user_agents: Vec<String>,
    /// Cookies sent with every request.
    pub cookies: BTreeMap<String, String>,
    /// Proxy URLs keyed by scheme: `http`, `https` or `all`.
    pub proxies: BTreeMap<String, String>,
    /// Request timeout in seconds.
    pub timeout: f64,
}

impl Default for RequestConfig {
    fn default() -> Self {
        Self {
            user_agent: None,
            user_agents: Vec::new(),
            cookies: BTreeMap::new(),
            proxies: BTreeMap::new(),
            timeout: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl RequestConfig {
    /// Timeout as a `Duration`. Non-positive or non-finite values fall back to the default.
    pub fn timeout(&self) -> Duration {
        if self.timeout.is_finite() && self.timeout > 0.0 {
            Duration::from_secs_f64(self.timeout)
        } else {
            Duration::from_secs_f64(DEFAULT_TIMEOUT_SECS)
        }
    }

    /// Renders the cookie map as a single `Cookie` header value.
    pub fn cookie_header(&self) -> Option<String> {
        if self.cookies.is_empty() {
            return None;
        }
        Some(
            self.cookies
                .iter()
                .map(|(name, value)| format!("{}={}", name, value))
                .collect::<Vec<_>>()
                .join("; "),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_partial_block() {
        let config: RequestConfig = serde_json::from_str(
            r#"{"user_agents": ["ua-1"], "cookies": {"b": "2", "a": "1"}, "timeout": 5}"#,
        )
        .unwrap();
        assert_eq!(config.user_agents, vec!["ua-1".to_string()]);
        assert_eq!(config.timeout(), Duration::from_secs(5));
        assert_eq!(config.cookie_header().as_deref(), Some("a=1; b=2"));
        assert!(config.proxies.is_empty());
    }

    #[test]
    fn defaults_when_empty() {
        let config: RequestConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, RequestConfig::default());
        assert_eq!(config.timeout(), Duration::from_secs(15));
        assert!(config.cookie_header().is_none());
    }

    #[test]
    fn bad_timeout_uses_default() {
        let config = RequestConfig {
            timeout: -1.0,
            ..Default::default()
        };
        assert_eq!(config.timeout(), Duration::from_secs(15));
    }
}
