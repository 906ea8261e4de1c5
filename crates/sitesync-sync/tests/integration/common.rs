//! Shared test helpers for engine integration tests
//!
//! [`FakeLibrary`] is an in-memory [`IDocumentLibrary`] with canned
//! discovery results and per-item download responses.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use sitesync_core::domain::errors::{DiscoveryError, DownloadError};
use sitesync_core::domain::index::{DiscoveryOutcome, FileIndex};
use sitesync_core::domain::newtypes::ItemId;
use sitesync_core::ports::document_library::{DiscoveryRoot, IDocumentLibrary};

/// Canned response for one item's download
pub enum Download {
    Content(Vec<u8>),
    Unauthorized,
    NotFound,
}

/// In-memory document library for engine tests
pub struct FakeLibrary {
    index: FileIndex,
    folders_skipped: u32,
    unauthorized_discovery: bool,
    downloads: Mutex<HashMap<String, Download>>,
}

impl FakeLibrary {
    pub fn new() -> Self {
        Self {
            index: FileIndex::new(),
            folders_skipped: 0,
            unauthorized_discovery: false,
            downloads: Mutex::new(HashMap::new()),
        }
    }

    /// Registers a file in the index with content served on download
    pub fn with_file(mut self, path: &str, item_id: &str, content: &[u8]) -> Self {
        self.index.insert(path, id(item_id));
        self.downloads
            .get_mut()
            .unwrap()
            .insert(item_id.to_string(), Download::Content(content.to_vec()));
        self
    }

    /// Registers a file whose download fails
    pub fn with_failing_file(mut self, path: &str, item_id: &str, failure: Download) -> Self {
        self.index.insert(path, id(item_id));
        self.downloads
            .get_mut()
            .unwrap()
            .insert(item_id.to_string(), failure);
        self
    }

    /// Marks the discovery result as partial
    #[allow(dead_code)]
    pub fn with_skipped_folders(mut self, count: u32) -> Self {
        self.folders_skipped = count;
        self
    }

    /// Makes every discovery pass fail with a token rejection
    pub fn with_unauthorized_discovery(mut self) -> Self {
        self.unauthorized_discovery = true;
        self
    }
}

#[async_trait]
impl IDocumentLibrary for FakeLibrary {
    async fn discover(
        &self,
        _root: &DiscoveryRoot,
        _structured: bool,
    ) -> Result<DiscoveryOutcome, DiscoveryError> {
        if self.unauthorized_discovery {
            return Err(DiscoveryError::Unauthorized("token expired".to_string()));
        }
        Ok(DiscoveryOutcome {
            index: self.index.clone(),
            folders_skipped: self.folders_skipped,
        })
    }

    async fn download(&self, item: &ItemId) -> Result<Vec<u8>, DownloadError> {
        let downloads = self.downloads.lock().unwrap();
        match downloads.get(item.as_str()) {
            Some(Download::Content(bytes)) => Ok(bytes.clone()),
            Some(Download::Unauthorized) => {
                Err(DownloadError::Unauthorized("token expired".to_string()))
            }
            Some(Download::NotFound) | None => {
                Err(DownloadError::NotFound(item.as_str().to_string()))
            }
        }
    }
}

pub fn id(s: &str) -> ItemId {
    ItemId::new(s.to_string()).unwrap()
}
