//! Shared test helpers for Graph API integration tests
//!
//! Provides wiremock-based mock server setup for the site / drives /
//! folder / children endpoints and a pre-wired [`GraphDocumentLibrary`]
//! pointing at the mock server.

use sitesync_core::domain::errors::AuthError;
use sitesync_core::domain::session::Session;
use sitesync_core::ports::secret_provider::ISecretProvider;
use sitesync_graph::provider::GraphDocumentLibrary;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const HOSTNAME: &str = "contoso.sharepoint.com";
pub const SITE_NAME: &str = "Analytics";
pub const SITE_ID: &str = "contoso.sharepoint.com,site-1111,web-2222";
pub const LIBRARY_NAME: &str = "Documents";
pub const DRIVE_ID: &str = "drive-test-001";
pub const ROOT_FOLDER_ID: &str = "root-folder-001";

/// Secret provider returning a fixed secret for any scope/key
pub struct StaticSecrets(pub &'static str);

impl ISecretProvider for StaticSecrets {
    fn get(&self, _scope: &str, _key: &str) -> Result<String, AuthError> {
        Ok(self.0.to_string())
    }
}

/// Sets up a mock server with site and drive resolution endpoints and
/// returns a (MockServer, GraphDocumentLibrary) pair.
///
/// Pre-configured endpoints:
/// - GET /sites/{hostname}:/sites/{site} → site id
/// - GET /sites/{site_id}/drives → one drive named "Documents"
/// - GET /drives/{drive_id}/root → library root folder
pub async fn setup_library_mock() -> (MockServer, GraphDocumentLibrary) {
    let server = MockServer::start().await;

    mount_site(&server).await;
    mount_drives(
        &server,
        serde_json::json!([
            {"id": DRIVE_ID, "name": LIBRARY_NAME},
            {"id": "drive-assets", "name": "Site Assets"}
        ]),
    )
    .await;
    mount_library_root(&server).await;

    let session = Session::new("test-access-token");
    let library = GraphDocumentLibrary::with_base_url(
        &session,
        server.uri(),
        HOSTNAME,
        SITE_NAME,
        LIBRARY_NAME,
    );

    (server, library)
}

/// Mounts the site-by-name lookup
pub async fn mount_site(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path(format!("/sites/{HOSTNAME}:/sites/{SITE_NAME}")))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"id": SITE_ID})),
        )
        .mount(server)
        .await;
}

/// Mounts the site drives listing
pub async fn mount_drives(server: &MockServer, drives: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path(format!("/sites/{SITE_ID}/drives")))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"value": drives})),
        )
        .mount(server)
        .await;
}

/// Mounts the library root folder lookup
pub async fn mount_library_root(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path(format!("/drives/{DRIVE_ID}/root")))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"id": ROOT_FOLDER_ID})),
        )
        .mount(server)
        .await;
}

/// Mounts a single-page children listing for a folder
pub async fn mount_children(server: &MockServer, folder_id: &str, items: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path(format!(
            "/drives/{DRIVE_ID}/items/{folder_id}/children"
        )))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"value": items})),
        )
        .mount(server)
        .await;
}

/// Mounts a file download endpoint for a specific item id
pub async fn mount_download(server: &MockServer, item_id: &str, content: &[u8]) {
    Mock::given(method("GET"))
        .and(path(format!("/drives/{DRIVE_ID}/items/{item_id}/content")))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_bytes(content.to_vec())
                .append_header("Content-Type", "application/octet-stream"),
        )
        .mount(server)
        .await;
}

/// JSON for a file child in a children listing
pub fn file_item(id: &str, name: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "name": name,
        "size": 1024,
        "file": {"mimeType": "application/octet-stream"}
    })
}

/// JSON for a folder child in a children listing
pub fn folder_item(id: &str, name: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "name": name,
        "folder": {"childCount": 1}
    })
}
