//! Download-and-persist helper.
//!
//! [`HttpClient::download_image`] issues a single GET and streams the body to
//! disk. File handles are scoped so they are released on every exit path,
//! including errors; the body is written through a buffered writer with an
//! explicit flush.

use std::path::{Path, PathBuf};

use futures_util::StreamExt;
use reqwest::StatusCode;
use reqwest::header::{CONTENT_TYPE, HeaderMap};
use tokio::fs::File;
use tokio::io::{AsyncWriteExt, BufWriter};
use tracing::{debug, info, instrument};
use url::Url;

use crate::client::HttpClient;
use crate::error::HttpError;

/// Fallback extension when the Content-Type header is absent or unparseable.
const DEFAULT_EXTENSION: &str = "jpg";

/// Outcome of a completed download.
///
/// The response body is consumed by the streaming write, so the response
/// itself cannot be returned; this carries the caller-visible metadata
/// alongside the resolved path.
#[derive(Debug, Clone)]
pub struct DownloadResult {
    /// Final output path.
    pub path: PathBuf,
    /// Number of body bytes written to disk.
    pub bytes_written: u64,
    /// The response status (always 200 on success).
    pub status: StatusCode,
    /// The response headers.
    pub headers: HeaderMap,
}

impl HttpClient {
    /// Downloads a resource and saves it to disk.
    ///
    /// When `save_path` is given the file is created (or truncated) exactly
    /// there. When absent, the filename is derived from the URL's last path
    /// segment plus an extension taken from the Content-Type subtype
    /// (defaulting to `.jpg`), and written into the current working
    /// directory. A segment that already carries an extension keeps it, so
    /// `y.png` served as `image/png` is written as `y.png.png`.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::HttpStatus`] for any non-200 response (nothing is
    /// written), [`HttpError::Io`] for file creation/write failures, and the
    /// usual dispatch errors from [`get`](Self::get).
    #[instrument(skip(self), fields(url = %url))]
    pub async fn download_image(
        &self,
        url: &str,
        save_path: Option<&Path>,
    ) -> Result<DownloadResult, HttpError> {
        let response = self.get(url).await?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(HttpError::http_status(url, status.as_u16()));
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);

        let file_path = match save_path {
            Some(path) => path.to_path_buf(),
            None => PathBuf::from(".").join(derive_filename(url, content_type.as_deref())),
        };
        debug!(path = %file_path.display(), "resolved download path");

        let headers = response.headers().clone();
        let bytes_written = stream_to_file(response, url, &file_path).await?;

        info!(
            path = %file_path.display(),
            bytes = bytes_written,
            "download complete"
        );

        Ok(DownloadResult {
            path: file_path,
            bytes_written,
            status,
            headers,
        })
    }
}

/// Streams the response body to a file, returning bytes written.
///
/// The file handle is dropped (and thus closed) on every exit path.
async fn stream_to_file(
    response: reqwest::Response,
    url: &str,
    file_path: &Path,
) -> Result<u64, HttpError> {
    let file = File::create(file_path)
        .await
        .map_err(|e| HttpError::io(file_path, e))?;
    let mut writer = BufWriter::new(file);
    let mut stream = response.bytes_stream();
    let mut bytes_written: u64 = 0;

    while let Some(chunk_result) = stream.next().await {
        let chunk = chunk_result.map_err(|e| HttpError::network(url, e))?;
        writer
            .write_all(&chunk)
            .await
            .map_err(|e| HttpError::io(file_path, e))?;
        bytes_written += chunk.len() as u64;
    }

    // Ensure all data is flushed to disk
    writer
        .flush()
        .await
        .map_err(|e| HttpError::io(file_path, e))?;

    Ok(bytes_written)
}

/// Derives the on-disk filename for a download saved without an explicit path.
///
/// The name is the URL's last path segment with `"." + subtype` appended,
/// where the subtype comes from the Content-Type header with any `;`
/// parameters stripped. The appended extension does not replace one already
/// present in the segment.
pub(crate) fn derive_filename(url: &str, content_type: Option<&str>) -> String {
    let base = Url::parse(url)
        .ok()
        .and_then(|parsed| {
            parsed
                .path_segments()
                .and_then(|mut segments| segments.next_back().map(str::to_owned))
        })
        .unwrap_or_default();

    let extension = content_type
        .and_then(|value| value.split('/').nth(1))
        .map(|subtype| subtype.split(';').next().unwrap_or(subtype).trim())
        .filter(|subtype| !subtype.is_empty())
        .map_or_else(|| DEFAULT_EXTENSION.to_string(), str::to_lowercase);

    format!("{base}.{extension}")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_derive_filename_appends_content_type_subtype() {
        // The extension is appended even when the segment already has one:
        // "y.png" + image/png -> "y.png.png".
        assert_eq!(
            derive_filename("http://example.com/y.png", Some("image/png")),
            "y.png.png"
        );
    }

    #[test]
    fn test_derive_filename_defaults_to_jpg_without_content_type() {
        assert_eq!(
            derive_filename("http://example.com/photos/cat", None),
            "cat.jpg"
        );
    }

    #[test]
    fn test_derive_filename_defaults_to_jpg_for_unparseable_content_type() {
        assert_eq!(
            derive_filename("http://example.com/photos/cat", Some("garbage")),
            "cat.jpg"
        );
    }

    #[test]
    fn test_derive_filename_strips_content_type_parameters() {
        assert_eq!(
            derive_filename("http://example.com/pic", Some("image/webp; charset=binary")),
            "pic.webp"
        );
    }

    #[test]
    fn test_derive_filename_ignores_query_string() {
        assert_eq!(
            derive_filename("http://example.com/img.gif?size=large", Some("image/gif")),
            "img.gif.gif"
        );
    }

    #[test]
    fn test_derive_filename_trailing_slash_yields_bare_extension() {
        // Last path segment of a trailing-slash URL is empty; the derived
        // name is just the extension.
        assert_eq!(
            derive_filename("http://example.com/photos/", Some("image/png")),
            ".png"
        );
    }
}
