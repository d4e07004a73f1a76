//! Client configuration for the realtime comment channel.
//!
//! DESIGN
//! ======
//! The browser has no environment to read from, so configuration is a typed
//! struct with compiled-in defaults. The websocket URL is derived from the
//! page location so the feed always talks to the host that served it.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

pub const DEFAULT_SOCKET_PATH: &str = "/socket.io/";
pub const DEFAULT_RECONNECT_INITIAL_MS: u32 = 1000;
pub const DEFAULT_RECONNECT_MAX_MS: u32 = 10_000;
pub const DEFAULT_TAB: &str = "Home";

/// Fallback host when the page location is unavailable.
const FALLBACK_HOST: &str = "localhost:5000";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FeedConfig {
    /// Socket.IO endpoint path on the serving host.
    pub socket_path: String,
    /// First reconnect delay after a dropped connection.
    pub reconnect_initial_ms: u32,
    /// Upper bound for the doubling reconnect delay.
    pub reconnect_max_ms: u32,
    /// Tab shown when the route does not name one.
    pub default_tab: String,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            socket_path: DEFAULT_SOCKET_PATH.to_owned(),
            reconnect_initial_ms: DEFAULT_RECONNECT_INITIAL_MS,
            reconnect_max_ms: DEFAULT_RECONNECT_MAX_MS,
            default_tab: DEFAULT_TAB.to_owned(),
        }
    }
}

impl FeedConfig {
    /// Build the Engine.IO websocket URL for the page at `href` on `host`.
    ///
    /// `wss` is used when the page itself was served over https.
    #[must_use]
    pub fn socket_url(&self, href: &str, host: &str) -> String {
        let scheme = if href.starts_with("https") { "wss" } else { "ws" };
        let host = if host.is_empty() { FALLBACK_HOST } else { host };
        let path = self.socket_path.trim_end_matches('/');
        let path = if path.starts_with('/') { path.to_owned() } else { format!("/{path}") };
        format!("{scheme}://{host}{path}/?EIO=4&transport=websocket")
    }

    /// Next reconnect delay after waiting `current_ms`.
    #[must_use]
    pub fn next_backoff(&self, current_ms: u32) -> u32 {
        current_ms.saturating_mul(2).min(self.reconnect_max_ms)
    }
}
