//! Integration tests for remote tree discovery
//!
//! Verifies end-to-end behavior of the discovery pass against a
//! wiremock-based Graph API mock server:
//! - Structured and flat index key construction
//! - Pagination across children pages
//! - Partial discovery when a subtree listing fails
//! - Terminal failures resolving site, library, and starting folder

use sitesync_core::domain::errors::DiscoveryError;
use sitesync_core::domain::session::Session;
use sitesync_core::ports::document_library::{DiscoveryRoot, IDocumentLibrary};
use sitesync_graph::provider::GraphDocumentLibrary;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::common;
use crate::common::{DRIVE_ID, ROOT_FOLDER_ID};

#[tokio::test]
async fn test_discover_flat_listing() {
    let (server, library) = common::setup_library_mock().await;

    common::mount_children(
        &server,
        ROOT_FOLDER_ID,
        serde_json::json!([
            common::file_item("item-1", "report.xlsx"),
            common::file_item("item-2", "notes.txt"),
        ]),
    )
    .await;

    let outcome = library
        .discover(&DiscoveryRoot::LibraryRoot, true)
        .await
        .expect("Discovery failed");

    assert_eq!(outcome.files_discovered(), 2);
    assert!(!outcome.is_partial());
    assert_eq!(
        outcome.index.get("report.xlsx").unwrap().as_str(),
        "item-1"
    );
    assert_eq!(outcome.index.get("notes.txt").unwrap().as_str(), "item-2");
}

#[tokio::test]
async fn test_discover_structured_keys_preserve_folders() {
    let (server, library) = common::setup_library_mock().await;

    common::mount_children(
        &server,
        ROOT_FOLDER_ID,
        serde_json::json!([
            common::folder_item("folder-reports", "Reports"),
            common::file_item("item-root", "readme.txt"),
        ]),
    )
    .await;
    common::mount_children(
        &server,
        "folder-reports",
        serde_json::json!([
            common::folder_item("folder-2026", "2026"),
            common::file_item("item-summary", "summary.csv"),
        ]),
    )
    .await;
    common::mount_children(
        &server,
        "folder-2026",
        serde_json::json!([common::file_item("item-q1", "q1.xlsx")]),
    )
    .await;

    let outcome = library
        .discover(&DiscoveryRoot::LibraryRoot, true)
        .await
        .expect("Discovery failed");

    assert_eq!(outcome.files_discovered(), 3);
    assert!(outcome.index.contains("readme.txt"));
    assert!(outcome.index.contains("Reports/summary.csv"));
    assert!(outcome.index.contains("Reports/2026/q1.xlsx"));
}

#[tokio::test]
async fn test_discover_flat_mode_collision_keeps_last() {
    let (server, library) = common::setup_library_mock().await;

    // Two folders each containing a file named data.csv. In flat mode
    // the index ends up with a single entry for the later sibling.
    common::mount_children(
        &server,
        ROOT_FOLDER_ID,
        serde_json::json!([
            common::folder_item("folder-a", "A"),
            common::folder_item("folder-b", "B"),
        ]),
    )
    .await;
    common::mount_children(
        &server,
        "folder-a",
        serde_json::json!([common::file_item("item-a", "data.csv")]),
    )
    .await;
    common::mount_children(
        &server,
        "folder-b",
        serde_json::json!([common::file_item("item-b", "data.csv")]),
    )
    .await;

    let outcome = library
        .discover(&DiscoveryRoot::LibraryRoot, false)
        .await
        .expect("Discovery failed");

    assert_eq!(outcome.files_discovered(), 1);
    assert_eq!(outcome.index.get("data.csv").unwrap().as_str(), "item-b");
}

#[tokio::test]
async fn test_discover_subfolder_root() {
    let (server, library) = common::setup_library_mock().await;

    Mock::given(method("GET"))
        .and(path(format!("/drives/{DRIVE_ID}/root:/Reports/2026")))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"id": "folder-2026"})),
        )
        .mount(&server)
        .await;
    common::mount_children(
        &server,
        "folder-2026",
        serde_json::json!([common::file_item("item-q1", "q1.xlsx")]),
    )
    .await;

    let outcome = library
        .discover(
            &DiscoveryRoot::Subfolder("Reports/2026".to_string()),
            true,
        )
        .await
        .expect("Discovery failed");

    // Keys are relative to the discovery root, not the library root.
    assert_eq!(outcome.files_discovered(), 1);
    assert!(outcome.index.contains("q1.xlsx"));
}

#[tokio::test]
async fn test_discover_follows_pagination() {
    let (server, library) = common::setup_library_mock().await;

    // Page 1 returns a nextLink; page 2 is fetched through the absolute URL.
    Mock::given(method("GET"))
        .and(path(format!(
            "/drives/{DRIVE_ID}/items/{ROOT_FOLDER_ID}/children"
        )))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "value": [common::file_item("item-1", "page1.txt")],
            "@odata.nextLink": format!(
                "{}/drives/{}/items/{}/children?$skiptoken=page2",
                server.uri(),
                DRIVE_ID,
                ROOT_FOLDER_ID
            )
        })))
        .up_to_n_times(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path(format!(
            "/drives/{DRIVE_ID}/items/{ROOT_FOLDER_ID}/children"
        )))
        .and(query_param("$skiptoken", "page2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "value": [common::file_item("item-2", "page2.txt")]
        })))
        .mount(&server)
        .await;

    let outcome = library
        .discover(&DiscoveryRoot::LibraryRoot, true)
        .await
        .expect("Discovery failed");

    assert_eq!(outcome.files_discovered(), 2);
    assert!(outcome.index.contains("page1.txt"));
    assert!(outcome.index.contains("page2.txt"));
}

#[tokio::test]
async fn test_discover_skips_subtree_on_listing_failure() {
    let (server, library) = common::setup_library_mock().await;

    common::mount_children(
        &server,
        ROOT_FOLDER_ID,
        serde_json::json!([
            common::folder_item("folder-broken", "Broken"),
            common::file_item("item-ok", "ok.txt"),
        ]),
    )
    .await;
    Mock::given(method("GET"))
        .and(path(format!(
            "/drives/{DRIVE_ID}/items/folder-broken/children"
        )))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    let outcome = library
        .discover(&DiscoveryRoot::LibraryRoot, true)
        .await
        .expect("Discovery should degrade, not fail");

    assert!(outcome.is_partial());
    assert_eq!(outcome.folders_skipped, 1);
    assert!(outcome.index.contains("ok.txt"));
}

#[tokio::test]
async fn test_discover_unknown_site_fails() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!(
            "/sites/{}:/sites/{}",
            common::HOSTNAME,
            common::SITE_NAME
        )))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let session = Session::new("token");
    let library = GraphDocumentLibrary::with_base_url(
        &session,
        server.uri(),
        common::HOSTNAME,
        common::SITE_NAME,
        common::LIBRARY_NAME,
    );

    let err = library
        .discover(&DiscoveryRoot::LibraryRoot, true)
        .await
        .unwrap_err();
    assert!(matches!(err, DiscoveryError::SiteNotFound(_)));
}

#[tokio::test]
async fn test_discover_unknown_library_fails() {
    let server = MockServer::start().await;

    common::mount_site(&server).await;
    common::mount_drives(
        &server,
        serde_json::json!([{"id": "drive-other", "name": "Some Other Library"}]),
    )
    .await;

    let session = Session::new("token");
    let library = GraphDocumentLibrary::with_base_url(
        &session,
        server.uri(),
        common::HOSTNAME,
        common::SITE_NAME,
        common::LIBRARY_NAME,
    );

    let err = library
        .discover(&DiscoveryRoot::LibraryRoot, true)
        .await
        .unwrap_err();
    assert!(matches!(err, DiscoveryError::LibraryNotFound(name) if name == "Documents"));
}

#[tokio::test]
async fn test_discover_unknown_subfolder_fails() {
    let (server, library) = common::setup_library_mock().await;

    Mock::given(method("GET"))
        .and(path(format!("/drives/{DRIVE_ID}/root:/Missing")))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let err = library
        .discover(&DiscoveryRoot::Subfolder("Missing".to_string()), true)
        .await
        .unwrap_err();
    assert!(matches!(err, DiscoveryError::FolderNotFound(path) if path == "Missing"));
}

#[tokio::test]
async fn test_discover_unauthorized_is_terminal() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!(
            "/sites/{}:/sites/{}",
            common::HOSTNAME,
            common::SITE_NAME
        )))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let session = Session::new("expired-token");
    let library = GraphDocumentLibrary::with_base_url(
        &session,
        server.uri(),
        common::HOSTNAME,
        common::SITE_NAME,
        common::LIBRARY_NAME,
    );

    let err = library
        .discover(&DiscoveryRoot::LibraryRoot, true)
        .await
        .unwrap_err();
    assert!(matches!(err, DiscoveryError::Unauthorized(_)));
}
