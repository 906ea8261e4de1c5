//! Integration tests for content downloads
//!
//! Downloads go by item id through the drive id cached during
//! discovery, so each test runs a discovery pass first.

use sitesync_core::domain::errors::DownloadError;
use sitesync_core::domain::newtypes::ItemId;
use sitesync_core::ports::document_library::{DiscoveryRoot, IDocumentLibrary};
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

use crate::common;
use crate::common::{DRIVE_ID, ROOT_FOLDER_ID};

fn id(s: &str) -> ItemId {
    ItemId::new(s.to_string()).unwrap()
}

#[tokio::test]
async fn test_download_returns_content_bytes() {
    let (server, library) = common::setup_library_mock().await;

    common::mount_children(
        &server,
        ROOT_FOLDER_ID,
        serde_json::json!([common::file_item("item-1", "notes.txt")]),
    )
    .await;
    common::mount_download(&server, "item-1", b"hello from sharepoint").await;

    library
        .discover(&DiscoveryRoot::LibraryRoot, true)
        .await
        .expect("Discovery failed");

    let bytes = library.download(&id("item-1")).await.expect("Download failed");
    assert_eq!(bytes, b"hello from sharepoint");
}

#[tokio::test]
async fn test_download_before_discovery_fails() {
    let (_server, library) = common::setup_library_mock().await;

    let err = library.download(&id("item-1")).await.unwrap_err();
    assert!(matches!(err, DownloadError::Unresolved));
}

#[tokio::test]
async fn test_download_missing_item_is_not_found() {
    let (server, library) = common::setup_library_mock().await;

    common::mount_children(&server, ROOT_FOLDER_ID, serde_json::json!([])).await;
    Mock::given(method("GET"))
        .and(path(format!("/drives/{DRIVE_ID}/items/item-gone/content")))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    library
        .discover(&DiscoveryRoot::LibraryRoot, true)
        .await
        .expect("Discovery failed");

    let err = library.download(&id("item-gone")).await.unwrap_err();
    assert!(matches!(err, DownloadError::NotFound(_)));
}

#[tokio::test]
async fn test_download_expired_token_is_unauthorized() {
    let (server, library) = common::setup_library_mock().await;

    common::mount_children(&server, ROOT_FOLDER_ID, serde_json::json!([])).await;
    Mock::given(method("GET"))
        .and(path(format!("/drives/{DRIVE_ID}/items/item-1/content")))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    library
        .discover(&DiscoveryRoot::LibraryRoot, true)
        .await
        .expect("Discovery failed");

    let err = library.download(&id("item-1")).await.unwrap_err();
    assert!(matches!(err, DownloadError::Unauthorized(_)));
}

#[tokio::test]
async fn test_download_server_error_carries_status() {
    let (server, library) = common::setup_library_mock().await;

    common::mount_children(&server, ROOT_FOLDER_ID, serde_json::json!([])).await;
    Mock::given(method("GET"))
        .and(path(format!("/drives/{DRIVE_ID}/items/item-1/content")))
        .respond_with(ResponseTemplate::new(503).set_body_string("service unavailable"))
        .mount(&server)
        .await;

    library
        .discover(&DiscoveryRoot::LibraryRoot, true)
        .await
        .expect("Discovery failed");

    let err = library.download(&id("item-1")).await.unwrap_err();
    match err {
        DownloadError::Status { status, reason } => {
            assert_eq!(status, 503);
            assert_eq!(reason, "service unavailable");
        }
        other => panic!("expected Status error, got {other:?}"),
    }
}
