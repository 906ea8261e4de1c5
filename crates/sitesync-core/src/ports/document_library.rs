//! Document library port (driven/secondary port)
//!
//! Interface for the remote document store. The primary implementation
//! targets SharePoint document libraries via the Microsoft Graph API,
//! but the trait is provider-agnostic: the engine only needs a way to
//! rebuild the file index and to fetch content by item id.
//!
//! ## Design Notes
//!
//! - Methods return the typed errors from the domain taxonomy rather
//!   than `anyhow::Error`, because the engine's control flow depends on
//!   the classification (an `Unauthorized` download invalidates the
//!   session; a `NotFound` is just a per-file failure).
//! - Discovery always rebuilds the index from scratch. There is no
//!   incremental diffing of a previous index.

use crate::domain::errors::{DiscoveryError, DownloadError};
use crate::domain::index::DiscoveryOutcome;
use crate::domain::newtypes::ItemId;

/// Where a discovery pass starts within the document library
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiscoveryRoot {
    /// The root folder of the document library
    LibraryRoot,
    /// A named subfolder path relative to the library root,
    /// e.g. `"Reports/2026"`
    Subfolder(String),
}

impl DiscoveryRoot {
    /// Builds a root selector from an optional folder path
    ///
    /// `None` or an empty string selects the library root.
    #[must_use]
    pub fn from_folder_path(folder_path: Option<&str>) -> Self {
        match folder_path {
            Some(path) if !path.is_empty() => Self::Subfolder(path.to_string()),
            _ => Self::LibraryRoot,
        }
    }
}

/// Port trait for remote document library operations
#[async_trait::async_trait]
pub trait IDocumentLibrary: Send + Sync {
    /// Enumerates the remote tree into a fresh file index
    ///
    /// Resolves the discovery root, then walks folders pre-order. When
    /// `structured` is true, index keys are full paths from the
    /// discovery root joined with `/`; when false, keys are bare file
    /// names and colliding basenames overwrite each other.
    ///
    /// A failure listing one folder's children skips that subtree and
    /// is reported via `folders_skipped`; failures resolving the root
    /// itself are terminal.
    ///
    /// # Arguments
    /// * `root` - library root or a named subfolder
    /// * `structured` - whether index keys preserve folder structure
    async fn discover(
        &self,
        root: &DiscoveryRoot,
        structured: bool,
    ) -> Result<DiscoveryOutcome, DiscoveryError>;

    /// Downloads a file's raw content by its remote item id
    async fn download(&self, id: &ItemId) -> Result<Vec<u8>, DownloadError>;
}
