//! Construction-time transport configuration.
//!
//! [`ClientConfig`] is consumed once by [`HttpClient::with_config`] and is
//! immutable afterwards; transport selection (HTTP/2 vs HTTP/3) happens at
//! construction with no runtime fallback.
//!
//! [`HttpClient::with_config`]: crate::HttpClient::with_config

use std::time::Duration;

/// Default per-client request timeout (30 seconds).
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Transport options recognized at construction time.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Attempt HTTP/2 over ALPN. When false the client is pinned to HTTP/1.1.
    pub enable_http2: bool,
    /// Select the HTTP/3 transport instead of the standard one.
    ///
    /// Only effective when the crate's `http3` cargo feature is enabled;
    /// without it the flag is inert and the standard transport is used.
    pub enable_http3: bool,
    /// Total per-request timeout, applied to every dispatched request.
    pub timeout: Duration,
}

impl Default for ClientConfig {
    /// HTTP/2 on, HTTP/3 off, 30-second timeout.
    fn default() -> Self {
        Self {
            enable_http2: true,
            enable_http3: false,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}
