//! Microsoft Graph API client
//!
//! Thin typed wrapper around `reqwest::Client` that handles bearer
//! authentication, base-URL construction, and the status-code → error
//! mapping the rest of the adapter builds on.

use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use sitesync_core::domain::errors::DownloadError;
use sitesync_core::domain::newtypes::ItemId;
use sitesync_core::domain::session::Session;
use tracing::debug;

/// Base URL for Microsoft Graph API v1.0
const GRAPH_BASE_URL: &str = "https://graph.microsoft.com/v1.0";

/// HTTP client for Microsoft Graph API calls
///
/// Created from an authenticated [`Session`]; the bearer token is fixed
/// for the client's lifetime. Expiry is discovered reactively through
/// 401 responses; there is no automatic refresh.
pub struct GraphClient {
    client: Client,
    base_url: String,
    access_token: String,
}

impl GraphClient {
    /// Creates a new GraphClient from an authenticated session
    pub fn new(session: &Session) -> Self {
        Self {
            client: Client::new(),
            base_url: GRAPH_BASE_URL.to_string(),
            access_token: session.access_token().to_string(),
        }
    }

    /// Creates a GraphClient with a custom base URL (useful for testing)
    pub fn with_base_url(session: &Session, base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
            access_token: session.access_token().to_string(),
        }
    }

    /// Returns the base URL for API requests
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Creates an authenticated request builder for the given method and path
    ///
    /// Prepends the base URL and adds the `Authorization` header.
    pub fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        self.client
            .request(method, &url)
            .bearer_auth(&self.access_token)
    }

    /// Creates an authenticated GET for an absolute URL
    ///
    /// Pagination links (`@odata.nextLink`) are absolute URLs, so they
    /// bypass the base-URL prefixing of [`request`](Self::request).
    pub fn get_absolute(&self, url: &str) -> RequestBuilder {
        self.client.get(url).bearer_auth(&self.access_token)
    }

    /// Downloads raw file content from a drive item
    ///
    /// `GET /drives/{drive_id}/items/{item_id}/content`; the Graph API
    /// answers with a redirect to the actual download URL, which reqwest
    /// follows automatically.
    pub async fn download_content(
        &self,
        drive_id: &str,
        item_id: &ItemId,
    ) -> Result<Vec<u8>, DownloadError> {
        let path = format!("/drives/{}/items/{}/content", drive_id, item_id.as_str());
        debug!(item = %item_id, "Downloading file content");

        let response = self
            .request(Method::GET, &path)
            .send()
            .await
            .map_err(|e| DownloadError::Network(e.to_string()))?;

        let response = classify_download(response).await?;

        let bytes = response
            .bytes()
            .await
            .map_err(|e| DownloadError::Network(e.to_string()))?;

        debug!(item = %item_id, len = bytes.len(), "Downloaded file content");
        Ok(bytes.to_vec())
    }
}

/// Maps a non-success download response to a typed [`DownloadError`]
async fn classify_download(response: Response) -> Result<Response, DownloadError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let reason = response.text().await.unwrap_or_default();
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            Err(DownloadError::Unauthorized(reason))
        }
        StatusCode::NOT_FOUND => Err(DownloadError::NotFound(reason)),
        _ => Err(DownloadError::Status {
            status: status.as_u16(),
            reason,
        }),
    }
}
