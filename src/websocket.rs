//! HTTP-to-WebSocket upgrade.
//!
//! [`HttpClient::websocket_connect`] performs the handshake with the
//! client's default headers attached to the upgrade request and hands the
//! established connection back to the caller. Keepalive, reconnection, and
//! message framing are the caller's responsibility from there.

use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::client::IntoClientRequest;
use tokio_tungstenite::tungstenite::handshake::client::Response as HandshakeResponse;
use tokio_tungstenite::tungstenite::http::header::USER_AGENT;
use tokio_tungstenite::tungstenite::http::{HeaderName, HeaderValue};
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};
use tracing::debug;

use crate::client::HttpClient;
use crate::error::HttpError;

/// Established bidirectional WebSocket connection over plain or TLS TCP.
pub type WsConnection = WebSocketStream<MaybeTlsStream<TcpStream>>;

impl HttpClient {
    /// Upgrades to a WebSocket connection.
    ///
    /// Uses a default dial configuration and attaches the client's default
    /// headers (and User-Agent, when set) to the upgrade request. Returns the
    /// established connection together with the raw handshake response.
    /// Header entries that are not valid HTTP header names/values are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::WebSocket`] if the URL cannot be turned into an
    /// upgrade request or the handshake fails (non-101 response, network
    /// failure).
    pub async fn websocket_connect(
        &self,
        url: &str,
    ) -> Result<(WsConnection, HandshakeResponse), HttpError> {
        let mut request = url
            .into_client_request()
            .map_err(|e| HttpError::websocket(url, e))?;

        for (name, value) in &self.default_headers {
            let Ok(header_name) = HeaderName::from_bytes(name.as_bytes()) else {
                debug!(header = %name, "skipping invalid header name on upgrade request");
                continue;
            };
            let Ok(header_value) = HeaderValue::from_str(value) else {
                debug!(header = %name, "skipping invalid header value on upgrade request");
                continue;
            };
            request.headers_mut().insert(header_name, header_value);
        }
        if let Some(agent) = self.user_agent.as_deref().filter(|a| !a.is_empty()) {
            if let Ok(header_value) = HeaderValue::from_str(agent) {
                request.headers_mut().insert(USER_AGENT, header_value);
            }
        }

        debug!(url, "starting WebSocket handshake");
        let (connection, response) = connect_async(request)
            .await
            .map_err(|e| HttpError::websocket(url, e))?;

        Ok((connection, response))
    }
}
