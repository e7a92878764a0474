//! Request dispatch: one internal primitive, seven thin verb aliases.
//!
//! Every verb delegates to [`HttpClient::send_request`], which assembles the
//! request, applies the default headers, and executes it once through the
//! owned transport. Transport errors come back unmodified in meaning: a
//! timeout maps to [`HttpError::Timeout`], everything else to
//! [`HttpError::Network`] carrying the source. No retry, no classification.

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, USER_AGENT};
use reqwest::{Method, Response};
use tracing::debug;
use url::Url;

use crate::client::HttpClient;
use crate::error::HttpError;

impl HttpClient {
    /// Makes a GET request.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::InvalidUrl`] for malformed URLs and
    /// [`HttpError::Timeout`] / [`HttpError::Network`] for transport failures.
    pub async fn get(&self, url: &str) -> Result<Response, HttpError> {
        self.send_request(Method::GET, url, None).await
    }

    /// Makes a POST request with the given body.
    ///
    /// # Errors
    ///
    /// Same as [`get`](Self::get).
    pub async fn post(&self, url: &str, body: Vec<u8>) -> Result<Response, HttpError> {
        self.send_request(Method::POST, url, Some(body)).await
    }

    /// Makes a PUT request with the given body.
    ///
    /// # Errors
    ///
    /// Same as [`get`](Self::get).
    pub async fn put(&self, url: &str, body: Vec<u8>) -> Result<Response, HttpError> {
        self.send_request(Method::PUT, url, Some(body)).await
    }

    /// Makes a PATCH request with the given body.
    ///
    /// # Errors
    ///
    /// Same as [`get`](Self::get).
    pub async fn patch(&self, url: &str, body: Vec<u8>) -> Result<Response, HttpError> {
        self.send_request(Method::PATCH, url, Some(body)).await
    }

    /// Makes a DELETE request.
    ///
    /// # Errors
    ///
    /// Same as [`get`](Self::get).
    pub async fn delete(&self, url: &str) -> Result<Response, HttpError> {
        self.send_request(Method::DELETE, url, None).await
    }

    /// Makes a HEAD request.
    ///
    /// # Errors
    ///
    /// Same as [`get`](Self::get).
    pub async fn head(&self, url: &str) -> Result<Response, HttpError> {
        self.send_request(Method::HEAD, url, None).await
    }

    /// Makes an OPTIONS request.
    ///
    /// # Errors
    ///
    /// Same as [`get`](Self::get).
    pub async fn options(&self, url: &str) -> Result<Response, HttpError> {
        self.send_request(Method::OPTIONS, url, None).await
    }

    /// Assembles and executes a single request through the owned transport.
    ///
    /// Headers are collected into a map with insert semantics, so a default
    /// header overwrites any same-named entry rather than appending a second
    /// value; the configured User-Agent is inserted last, when non-empty, and
    /// wins over a `User-Agent` key in the default headers. Entries that are
    /// not valid HTTP header names/values are skipped. The configured
    /// per-client timeout applies; there is no per-request override.
    pub(crate) async fn send_request(
        &self,
        method: Method,
        url: &str,
        body: Option<Vec<u8>>,
    ) -> Result<Response, HttpError> {
        Url::parse(url).map_err(|_| HttpError::invalid_url(url))?;

        debug!(method = %method, url, "dispatching request");

        let mut headers = HeaderMap::new();
        for (name, value) in &self.default_headers {
            let Ok(header_name) = HeaderName::from_bytes(name.as_bytes()) else {
                debug!(header = %name, "skipping invalid header name");
                continue;
            };
            let Ok(header_value) = HeaderValue::from_str(value) else {
                debug!(header = %name, "skipping invalid header value");
                continue;
            };
            headers.insert(header_name, header_value);
        }
        if let Some(agent) = self.user_agent.as_deref().filter(|a| !a.is_empty()) {
            if let Ok(header_value) = HeaderValue::from_str(agent) {
                headers.insert(USER_AGENT, header_value);
            }
        }

        let mut request = self.client.request(method, url).headers(headers);
        if let Some(body) = body {
            request = request.body(body);
        }

        request.send().await.map_err(|error| {
            if error.is_timeout() {
                HttpError::timeout(url)
            } else {
                HttpError::network(url, error)
            }
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_send_request_rejects_invalid_url() {
        let client = HttpClient::new();
        let result = client.get("not-a-valid-url").await;
        assert!(matches!(result, Err(HttpError::InvalidUrl { .. })));
    }

    #[tokio::test]
    async fn test_connection_refused_maps_to_network_error() {
        // Port 1 is virtually never listening; connection is refused fast.
        let client = HttpClient::new();
        let result = client.get("http://127.0.0.1:1/unreachable").await;
        assert!(matches!(result, Err(HttpError::Network { .. })));
    }
}
