//! The [`HttpClient`] wrapper and its fluent configuration builders.
//!
//! One client value owns a [`reqwest::Client`], a map of default headers
//! merged into every outgoing request, and an optional User-Agent. Builders
//! consume and return the instance so configuration chains; dispatch methods
//! take `&self` and may run concurrently once configuration is done.
//!
//! reqwest clients are immutable once built, so builders that touch
//! transport-level state (timeout, redirect policy, proxy) record the change
//! in [`TransportSettings`] and rebuild the inner client.

use std::collections::HashMap;
use std::fmt;
use std::time::Duration;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use reqwest::{Client, ClientBuilder, Proxy, redirect};
use tracing::debug;

use crate::config::ClientConfig;
use crate::user_agent;

/// Header name used by the cookie builders.
pub(crate) const COOKIE_HEADER: &str = "Cookie";

/// Header name used by the auth builders.
pub(crate) const AUTHORIZATION_HEADER: &str = "Authorization";

/// Transport-level state needed to rebuild the inner reqwest client when a
/// builder mutates it. Protocol selection is fixed at construction; the rest
/// is whatever the fluent builders have applied so far.
#[derive(Debug, Clone)]
pub(crate) struct TransportSettings {
    pub(crate) enable_http2: bool,
    pub(crate) enable_http3: bool,
    pub(crate) timeout: Duration,
    pub(crate) follow_all_redirects: bool,
    pub(crate) proxy: Option<Proxy>,
}

/// Fluent convenience wrapper around a [`reqwest::Client`].
///
/// The client is designed to be configured once via the chainable `with_*` /
/// `set_*` builders and then reused for many requests, inheriting reqwest's
/// connection pooling.
///
/// # Example
///
/// ```no_run
/// use rushr::HttpClient;
/// use std::time::Duration;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = HttpClient::new()
///     .with_timeout(Duration::from_secs(10))
///     .with_basic_auth("user", "pass");
/// let response = client.get("https://example.com").await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct HttpClient {
    pub(crate) client: Client,
    pub(crate) transport: TransportSettings,
    pub(crate) default_headers: HashMap<String, String>,
    pub(crate) user_agent: Option<String>,
}

impl Default for HttpClient {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpClient {
    /// Creates a client with default configuration: HTTP/2 enabled, HTTP/3
    /// disabled, 30-second timeout.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(ClientConfig::default())
    }

    /// Creates a client from an explicit [`ClientConfig`].
    ///
    /// Transport selection is decided here, once: `enable_http3` picks the
    /// HTTP/3 transport (crate `http3` feature), otherwise the standard
    /// transport is built with HTTP/2 ALPN per `enable_http2`. There is no
    /// runtime fallback; negotiation failures surface as request errors.
    #[must_use]
    pub fn with_config(config: ClientConfig) -> Self {
        let transport = TransportSettings {
            enable_http2: config.enable_http2,
            enable_http3: config.enable_http3,
            timeout: config.timeout,
            follow_all_redirects: false,
            proxy: None,
        };
        let client = build_transport_client(&transport);
        Self {
            client,
            transport,
            default_headers: HashMap::new(),
            user_agent: None,
        }
    }

    /// Replaces the per-request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.transport.timeout = timeout;
        self.rebuild_transport()
    }

    /// Merges the given key/value pairs into the default headers,
    /// overwriting existing keys (last write wins).
    #[must_use]
    pub fn with_headers(mut self, headers: HashMap<String, String>) -> Self {
        self.merge_headers(headers);
        self
    }

    /// Merges the given key/value pairs into the default headers.
    ///
    /// Functionally identical to [`with_headers`](Self::with_headers); both
    /// are kept for source compatibility with existing call sites.
    #[must_use]
    pub fn set_headers(mut self, headers: HashMap<String, String>) -> Self {
        self.merge_headers(headers);
        self
    }

    /// Replaces the `Cookie` default header with a fresh `name=value` list.
    ///
    /// Pairs are joined with `"; "` in sorted-by-name order so the resulting
    /// header is deterministic.
    #[must_use]
    pub fn with_cookies(mut self, cookies: HashMap<String, String>) -> Self {
        self.default_headers
            .insert(COOKIE_HEADER.to_string(), join_cookie_pairs(cookies));
        self
    }

    /// Appends cookies to the `Cookie` default header without replacing
    /// existing ones.
    ///
    /// Repeated names are NOT deduplicated: calling this twice with the same
    /// name accumulates both entries in the header value.
    #[must_use]
    pub fn set_cookies(mut self, cookies: HashMap<String, String>) -> Self {
        for (name, value) in sorted_pairs(cookies) {
            let pair = format!("{name}={value}");
            match self.default_headers.get_mut(COOKIE_HEADER) {
                Some(existing) if !existing.is_empty() => {
                    existing.push_str("; ");
                    existing.push_str(&pair);
                }
                _ => {
                    self.default_headers.insert(COOKIE_HEADER.to_string(), pair);
                }
            }
        }
        self
    }

    /// Sets the `Authorization` header to `Basic base64(username:password)`.
    #[must_use]
    pub fn with_basic_auth(mut self, username: &str, password: &str) -> Self {
        let credentials = BASE64_STANDARD.encode(format!("{username}:{password}"));
        self.default_headers.insert(
            AUTHORIZATION_HEADER.to_string(),
            format!("Basic {credentials}"),
        );
        self
    }

    /// Sets the `Authorization` header to `Bearer <token>`.
    #[must_use]
    pub fn with_bearer_token(mut self, token: &str) -> Self {
        self.default_headers
            .insert(AUTHORIZATION_HEADER.to_string(), format!("Bearer {token}"));
        self
    }

    /// Sets the User-Agent sent with every request.
    ///
    /// The sentinel value `"random"` instead picks a pseudo-random realistic
    /// browser User-Agent from [`crate::user_agent::random_user_agent`].
    #[must_use]
    pub fn with_user_agent(mut self, value: &str) -> Self {
        self.user_agent = if value == user_agent::RANDOM_SENTINEL {
            Some(user_agent::random_user_agent())
        } else {
            Some(value.to_string())
        };
        self
    }

    /// Configures the transport to follow all redirects unconditionally,
    /// overriding reqwest's default 10-hop limit.
    #[must_use]
    pub fn follow_redirects(mut self) -> Self {
        self.transport.follow_all_redirects = true;
        self.rebuild_transport()
    }

    /// Routes all traffic through the given proxy URL.
    ///
    /// An unparseable proxy URL is silently ignored and leaves the transport
    /// unchanged; no error is returned. This failure-swallowing behavior is
    /// intentional and pinned by tests.
    ///
    /// The rebuilt transport keeps the protocol selection, timeout, and
    /// redirect policy configured so far; only the proxy route changes.
    #[must_use]
    pub fn with_proxy(mut self, proxy_url: &str) -> Self {
        match Proxy::all(proxy_url) {
            Ok(proxy) => {
                self.transport.proxy = Some(proxy);
                self.rebuild_transport()
            }
            Err(error) => {
                debug!(error = %error, "ignoring unparseable proxy URL");
                self
            }
        }
    }

    /// Returns the default headers merged into every outgoing request.
    #[must_use]
    pub fn default_headers(&self) -> &HashMap<String, String> {
        &self.default_headers
    }

    /// Returns the configured User-Agent, if any.
    #[must_use]
    pub fn user_agent(&self) -> Option<&str> {
        self.user_agent.as_deref()
    }

    /// Returns a reference to the underlying reqwest client.
    ///
    /// This can be used for advanced operations not covered by this wrapper.
    #[must_use]
    pub fn inner(&self) -> &Client {
        &self.client
    }

    fn merge_headers(&mut self, headers: HashMap<String, String>) {
        for (key, value) in headers {
            self.default_headers.insert(key, value);
        }
    }

    /// Rebuilds the inner reqwest client from the recorded transport state.
    fn rebuild_transport(mut self) -> Self {
        self.client = build_transport_client(&self.transport);
        self
    }
}

// Custom Debug impl that redacts cookie and credential header values.
impl fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let headers: HashMap<&str, &str> = self
            .default_headers
            .iter()
            .map(|(name, value)| {
                if name.eq_ignore_ascii_case(COOKIE_HEADER)
                    || name.eq_ignore_ascii_case(AUTHORIZATION_HEADER)
                {
                    (name.as_str(), "[REDACTED]")
                } else {
                    (name.as_str(), value.as_str())
                }
            })
            .collect();
        f.debug_struct("HttpClient")
            .field("transport", &self.transport)
            .field("default_headers", &headers)
            .field("user_agent", &self.user_agent)
            .finish_non_exhaustive()
    }
}

/// Builds the inner reqwest client from transport state.
///
/// # Panics
///
/// Panics if the client builder fails with the recorded configuration. The
/// configuration is assembled entirely from validated values, so this should
/// never happen in practice.
#[allow(clippy::expect_used)]
fn build_transport_client(settings: &TransportSettings) -> Client {
    let mut builder = Client::builder().timeout(settings.timeout);
    builder = apply_protocol_selection(builder, settings);
    if settings.follow_all_redirects {
        builder = builder.redirect(redirect::Policy::custom(|attempt| attempt.follow()));
    }
    if let Some(proxy) = settings.proxy.clone() {
        builder = builder.proxy(proxy);
    }
    builder
        .build()
        .expect("failed to build HTTP client from validated transport settings")
}

#[cfg(feature = "http3")]
fn apply_protocol_selection(
    builder: ClientBuilder,
    settings: &TransportSettings,
) -> ClientBuilder {
    if settings.enable_http3 {
        builder.http3_prior_knowledge()
    } else if settings.enable_http2 {
        builder
    } else {
        builder.http1_only()
    }
}

#[cfg(not(feature = "http3"))]
fn apply_protocol_selection(
    builder: ClientBuilder,
    settings: &TransportSettings,
) -> ClientBuilder {
    // Without the `http3` cargo feature the enable_http3 flag is inert and
    // the standard transport is used.
    if settings.enable_http2 {
        builder
    } else {
        builder.http1_only()
    }
}

/// Joins cookie pairs as `name=value` separated by `"; "`, sorted by name.
fn join_cookie_pairs(cookies: HashMap<String, String>) -> String {
    sorted_pairs(cookies)
        .into_iter()
        .map(|(name, value)| format!("{name}={value}"))
        .collect::<Vec<_>>()
        .join("; ")
}

fn sorted_pairs(map: HashMap<String, String>) -> Vec<(String, String)> {
    let mut pairs: Vec<_> = map.into_iter().collect();
    pairs.sort_by(|a, b| a.0.cmp(&b.0));
    pairs
}
