//! Error types for client operations.
//!
//! Every operation returns its error to the caller unmodified in meaning:
//! transport failures carry the underlying source, non-200 downloads carry
//! the status code, and nothing is retried, logged as fatal, or reclassified.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while dispatching requests, upgrading to a
/// WebSocket, or persisting a download.
#[derive(Debug, Error)]
pub enum HttpError {
    /// Network-level error (DNS resolution, connection refused, TLS errors, etc.)
    #[error("network error requesting {url}: {source}")]
    Network {
        /// The URL that failed.
        url: String,
        /// The underlying transport error.
        #[source]
        source: reqwest::Error,
    },

    /// Request timed out before completion.
    #[error("timeout requesting {url}")]
    Timeout {
        /// The URL that timed out.
        url: String,
    },

    /// Non-success status on a download (anything other than 200).
    #[error("failed to download image: status code {status} for {url}")]
    HttpStatus {
        /// The URL that returned the status.
        url: String,
        /// The HTTP status code.
        status: u16,
    },

    /// File system error while persisting a download (create file, write, flush).
    #[error("IO error writing to {path}: {source}")]
    Io {
        /// The file path where the error occurred.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The provided URL is malformed or invalid.
    #[error("invalid URL: {url}")]
    InvalidUrl {
        /// The invalid URL string.
        url: String,
    },

    /// WebSocket handshake failure (non-101 response, network failure).
    #[error("WebSocket handshake failed for {url}: {source}")]
    WebSocket {
        /// The upgrade URL.
        url: String,
        /// The underlying handshake error.
        #[source]
        source: tokio_tungstenite::tungstenite::Error,
    },
}

impl HttpError {
    /// Creates a network error from a reqwest error.
    pub fn network(url: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Network {
            url: url.into(),
            source,
        }
    }

    /// Creates a timeout error.
    pub fn timeout(url: impl Into<String>) -> Self {
        Self::Timeout { url: url.into() }
    }

    /// Creates a non-success download status error.
    pub fn http_status(url: impl Into<String>, status: u16) -> Self {
        Self::HttpStatus {
            url: url.into(),
            status,
        }
    }

    /// Creates an IO error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Creates an invalid URL error.
    pub fn invalid_url(url: impl Into<String>) -> Self {
        Self::InvalidUrl { url: url.into() }
    }

    /// Creates a WebSocket handshake error.
    pub fn websocket(
        url: impl Into<String>,
        source: tokio_tungstenite::tungstenite::Error,
    ) -> Self {
        Self::WebSocket {
            url: url.into(),
            source,
        }
    }
}

// Note on From trait implementations:
// We intentionally do NOT implement `From<reqwest::Error>` or `From<std::io::Error>`
// because the variants require context (url, path) that the source errors don't
// provide. The helper constructors are the pattern used throughout the crate.

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_display() {
        let error = HttpError::timeout("https://example.com/slow");
        let msg = error.to_string();
        assert!(msg.contains("timeout"), "Expected 'timeout' in: {msg}");
        assert!(
            msg.contains("https://example.com/slow"),
            "Expected URL in: {msg}"
        );
    }

    #[test]
    fn test_http_status_display() {
        let error = HttpError::http_status("https://example.com/pic.png", 404);
        let msg = error.to_string();
        assert!(msg.contains("404"), "Expected '404' in: {msg}");
        assert!(
            msg.contains("failed to download image"),
            "Expected download context in: {msg}"
        );
    }

    #[test]
    fn test_io_display() {
        let io_error = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let error = HttpError::io(PathBuf::from("/tmp/pic.jpg"), io_error);
        let msg = error.to_string();
        assert!(msg.contains("/tmp/pic.jpg"), "Expected path in: {msg}");
    }

    #[test]
    fn test_invalid_url_display() {
        let error = HttpError::invalid_url("not-a-url");
        let msg = error.to_string();
        assert!(
            msg.contains("invalid URL"),
            "Expected 'invalid URL' in: {msg}"
        );
        assert!(msg.contains("not-a-url"), "Expected URL in: {msg}");
    }
}
