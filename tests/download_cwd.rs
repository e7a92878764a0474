//! Working-directory naming path of `download_image`.
//!
//! Kept in its own integration binary because it changes the process working
//! directory, which must not race with other tests.

use rushr::HttpClient;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_download_without_save_path_writes_doubled_extension_in_cwd() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/y.png"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("Content-Type", "image/png")
                .set_body_bytes(b"PNG bytes".to_vec()),
        )
        .mount(&mock_server)
        .await;

    let temp_dir = TempDir::new().expect("failed to create temp dir");
    std::env::set_current_dir(temp_dir.path()).expect("failed to change cwd");

    let client = HttpClient::new();
    let url = format!("{}/y.png", mock_server.uri());
    let result = client
        .download_image(&url, None)
        .await
        .expect("download should succeed");

    // The Content-Type subtype is appended on top of the extension already
    // in the URL segment: the file lands as y.png.png.
    let expected = temp_dir.path().join("y.png.png");
    assert!(
        expected.exists(),
        "expected {} to exist",
        expected.display()
    );
    assert_eq!(std::fs::read(&expected).expect("read file"), b"PNG bytes");
    assert!(result.path.ends_with("y.png.png"));
    assert_eq!(result.bytes_written, 9);
}
