//! Rushr Core Library
//!
//! A fluent convenience wrapper around [`reqwest`]: one client value carries
//! transport options (protocol version, timeout, proxy), default headers,
//! cookies, and authentication, and exposes the seven common HTTP verbs, a
//! WebSocket upgrade, and a download-to-disk helper.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//! - [`client`] - The [`HttpClient`] wrapper and its fluent builders
//! - [`config`] - Construction-time transport configuration
//! - [`download`] - Download-and-persist helper with streaming writes
//! - [`error`] - Structured error types for all operations
//! - [`user_agent`] - Random realistic User-Agent generator
//! - [`websocket`] - HTTP-to-WebSocket upgrade
//!
//! # Example
//!
//! ```no_run
//! use rushr::HttpClient;
//! use std::collections::HashMap;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = HttpClient::new()
//!     .with_bearer_token("s3cr3t")
//!     .with_headers(HashMap::from([("Accept".to_string(), "*/*".to_string())]));
//! let response = client.get("https://example.com/api/status").await?;
//! println!("status: {}", response.status());
//! # Ok(())
//! # }
//! ```

// Clippy lints - strict for library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod client;
pub mod config;
pub mod download;
pub mod error;
mod request;
pub mod user_agent;
pub mod websocket;

// Re-export commonly used types
pub use client::HttpClient;
pub use config::{ClientConfig, DEFAULT_TIMEOUT_SECS};
pub use download::DownloadResult;
pub use error::HttpError;
pub use user_agent::random_user_agent;
pub use websocket::WsConnection;
