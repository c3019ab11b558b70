//! User-agent selection.

use rand::seq::SliceRandom;

use crate::types::RequestConfig;

/// Sent when the request configuration names no user agent at all.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Picks the user agent for one request.
///
/// A non-empty `user_agents` list wins (random choice), then the single
/// `user_agent`, then [`DEFAULT_USER_AGENT`].
pub fn pick_user_agent(config: &RequestConfig) -> String {
    if let Some(ua) = config.user_agents.choose(&mut rand::thread_rng()) {
        return ua.clone();
    }
    config
        .user_agent
        .clone()
        .filter(|ua| !ua.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string())
}
