//! SharePoint document library adapter
//!
//! [`GraphDocumentLibrary`] implements the
//! [`IDocumentLibrary`] port on top of [`GraphClient`] and
//! [`RemoteTreeIndexer`]. Site and drive resolution happens lazily on
//! the first discovery pass; the resolved drive id is cached for the
//! lifetime of the adapter so downloads never repeat the lookups.

use std::sync::RwLock;

use async_trait::async_trait;
use sitesync_core::domain::errors::{DiscoveryError, DownloadError};
use sitesync_core::domain::index::DiscoveryOutcome;
use sitesync_core::domain::newtypes::ItemId;
use sitesync_core::domain::session::Session;
use sitesync_core::ports::document_library::{DiscoveryRoot, IDocumentLibrary};
use tracing::info;

use crate::client::GraphClient;
use crate::discovery::RemoteTreeIndexer;

/// [`IDocumentLibrary`] implementation backed by Microsoft Graph
pub struct GraphDocumentLibrary {
    client: GraphClient,
    hostname: String,
    site_name: String,
    library_name: String,
    /// Drive id resolved on the first discovery pass
    drive_id: RwLock<Option<String>>,
}

impl GraphDocumentLibrary {
    /// Creates an adapter for one site's document library
    ///
    /// # Arguments
    /// * `session` - authenticated session providing the bearer token
    /// * `hostname` - SharePoint hostname, e.g. `contoso.sharepoint.com`
    /// * `site_name` - site name as it appears in the site URL
    /// * `library_name` - document library display name
    pub fn new(
        session: &Session,
        hostname: impl Into<String>,
        site_name: impl Into<String>,
        library_name: impl Into<String>,
    ) -> Self {
        Self {
            client: GraphClient::new(session),
            hostname: hostname.into(),
            site_name: site_name.into(),
            library_name: library_name.into(),
            drive_id: RwLock::new(None),
        }
    }

    /// Creates an adapter against a custom base URL (useful for testing)
    pub fn with_base_url(
        session: &Session,
        base_url: impl Into<String>,
        hostname: impl Into<String>,
        site_name: impl Into<String>,
        library_name: impl Into<String>,
    ) -> Self {
        Self {
            client: GraphClient::with_base_url(session, base_url),
            hostname: hostname.into(),
            site_name: site_name.into(),
            library_name: library_name.into(),
            drive_id: RwLock::new(None),
        }
    }

    /// Returns the cached drive id, if discovery has run
    fn cached_drive_id(&self) -> Option<String> {
        self.drive_id.read().ok().and_then(|guard| guard.clone())
    }

    /// Resolves site and drive, caching the drive id
    async fn ensure_drive_id(&self) -> Result<String, DiscoveryError> {
        if let Some(id) = self.cached_drive_id() {
            return Ok(id);
        }

        let indexer = RemoteTreeIndexer::new(
            &self.client,
            &self.hostname,
            &self.site_name,
            &self.library_name,
        );
        let site_id = indexer.resolve_site_id().await?;
        let drive_id = indexer.resolve_drive_id(&site_id).await?;

        info!(
            site = %self.site_name,
            library = %self.library_name,
            drive = %drive_id,
            "Resolved document library"
        );

        if let Ok(mut guard) = self.drive_id.write() {
            *guard = Some(drive_id.clone());
        }
        Ok(drive_id)
    }
}

#[async_trait]
impl IDocumentLibrary for GraphDocumentLibrary {
    async fn discover(
        &self,
        root: &DiscoveryRoot,
        structured: bool,
    ) -> Result<DiscoveryOutcome, DiscoveryError> {
        let drive_id = self.ensure_drive_id().await?;

        let indexer = RemoteTreeIndexer::new(
            &self.client,
            &self.hostname,
            &self.site_name,
            &self.library_name,
        );
        indexer.discover_tree(&drive_id, root, structured).await
    }

    async fn download(&self, id: &ItemId) -> Result<Vec<u8>, DownloadError> {
        let drive_id = self.cached_drive_id().ok_or(DownloadError::Unresolved)?;
        self.client.download_content(&drive_id, id).await
    }
}
