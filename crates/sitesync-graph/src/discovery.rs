//! Remote tree discovery for SharePoint document libraries
//!
//! Resolves the discovery root through three sequential lookups and then
//! walks the folder tree into a flat [`FileIndex`]:
//!
//! 1. **Site id** by hostname and site name
//! 2. **Drive id** by matching the document library display name among
//!    the site's drives
//! 3. **Starting folder id** - the drive root, or a named subfolder
//!
//! Traversal uses an explicit worklist rather than recursion, pre-order
//! folder-then-children, and follows `@odata.nextLink` pagination on
//! each children listing. A failure listing one folder's children skips
//! that subtree (partial index) instead of failing the whole pass;
//! failures in the three root lookups are terminal.

use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use sitesync_core::domain::errors::DiscoveryError;
use sitesync_core::domain::index::{DiscoveryOutcome, FileIndex};
use sitesync_core::domain::newtypes::ItemId;
use sitesync_core::ports::document_library::DiscoveryRoot;
use tracing::{debug, info, warn};

use crate::client::GraphClient;

// ============================================================================
// Graph API response types (JSON deserialization)
// ============================================================================

/// Response from `GET /sites/{hostname}:/sites/{name}?$select=id`
#[derive(Debug, Deserialize)]
struct SiteResource {
    id: String,
}

/// Response from `GET /sites/{site_id}/drives`
#[derive(Debug, Deserialize)]
struct DriveCollection {
    #[serde(default)]
    value: Vec<DriveResource>,
}

/// A single drive (document library) on a site
#[derive(Debug, Deserialize)]
struct DriveResource {
    id: String,
    /// Display name of the library, matched against the configured name
    #[serde(default)]
    name: String,
}

/// Response from a drive item lookup (root or subfolder resolution)
#[derive(Debug, Deserialize)]
struct DriveItemResource {
    id: String,
}

/// One page of `GET /drives/{drive_id}/items/{item_id}/children`
#[derive(Debug, Deserialize)]
struct ChildrenPage {
    #[serde(default)]
    value: Vec<DriveChild>,

    /// URL for the next page of children (present when more pages exist)
    #[serde(rename = "@odata.nextLink")]
    next_link: Option<String>,
}

/// A child item in a children listing
///
/// The presence of the `folder` facet decides whether the child is
/// traversed into or recorded as a file.
#[derive(Debug, Deserialize)]
struct DriveChild {
    id: String,
    #[serde(default)]
    name: String,
    folder: Option<FolderFacet>,
}

/// Folder facet; its mere presence marks the item as a folder
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FolderFacet {
    #[allow(dead_code)]
    child_count: Option<u64>,
}

// ============================================================================
// RemoteTreeIndexer
// ============================================================================

/// Walks a document library's remote tree into a [`FileIndex`]
pub struct RemoteTreeIndexer<'a> {
    client: &'a GraphClient,
    hostname: &'a str,
    site_name: &'a str,
    library_name: &'a str,
}

impl<'a> RemoteTreeIndexer<'a> {
    /// Creates an indexer for the given site and document library
    pub fn new(
        client: &'a GraphClient,
        hostname: &'a str,
        site_name: &'a str,
        library_name: &'a str,
    ) -> Self {
        Self {
            client,
            hostname,
            site_name,
            library_name,
        }
    }

    /// Resolves the site name to a site id
    pub async fn resolve_site_id(&self) -> Result<String, DiscoveryError> {
        let path = format!(
            "/sites/{}:/sites/{}?$select=id",
            self.hostname, self.site_name
        );
        let site: SiteResource = self
            .get_json(&path, || {
                DiscoveryError::SiteNotFound(self.site_name.to_string())
            })
            .await?;

        debug!(site = self.site_name, id = %site.id, "Resolved site id");
        Ok(site.id)
    }

    /// Resolves the document library display name to a drive id
    ///
    /// Lists the site's drives and picks the one whose display name
    /// matches exactly. No match is a terminal discovery failure.
    pub async fn resolve_drive_id(&self, site_id: &str) -> Result<String, DiscoveryError> {
        let path = format!("/sites/{site_id}/drives");
        let drives: DriveCollection = self
            .get_json(&path, || {
                DiscoveryError::SiteNotFound(self.site_name.to_string())
            })
            .await?;

        let drive_id = drives
            .value
            .into_iter()
            .find(|d| d.name == self.library_name)
            .map(|d| d.id)
            .ok_or_else(|| DiscoveryError::LibraryNotFound(self.library_name.to_string()))?;

        debug!(library = self.library_name, id = %drive_id, "Resolved drive id");
        Ok(drive_id)
    }

    /// Resolves the starting folder id for a discovery root
    async fn resolve_start_folder(
        &self,
        drive_id: &str,
        root: &DiscoveryRoot,
    ) -> Result<String, DiscoveryError> {
        let (path, selector) = match root {
            DiscoveryRoot::LibraryRoot => (format!("/drives/{drive_id}/root"), "/".to_string()),
            DiscoveryRoot::Subfolder(folder_path) => (
                format!("/drives/{drive_id}/root:/{folder_path}"),
                folder_path.clone(),
            ),
        };

        let item: DriveItemResource = self
            .get_json(&path, || DiscoveryError::FolderNotFound(selector.clone()))
            .await?;

        debug!(folder = %selector, id = %item.id, "Resolved starting folder");
        Ok(item.id)
    }

    /// Walks the tree from the discovery root into a fresh index
    ///
    /// When `structured` is true, keys are full `/`-joined paths from
    /// the discovery root; when false, keys are bare file names and
    /// colliding basenames silently overwrite each other (last one
    /// discovered wins), an accepted trade-off of flat mode.
    pub async fn discover_tree(
        &self,
        drive_id: &str,
        root: &DiscoveryRoot,
        structured: bool,
    ) -> Result<DiscoveryOutcome, DiscoveryError> {
        let start_id = self.resolve_start_folder(drive_id, root).await?;

        let mut index = FileIndex::new();
        let mut folders_skipped: u32 = 0;

        // Explicit worklist instead of recursion so deep trees cannot
        // exhaust the call stack. Pre-order: a folder's entry is pushed
        // before its children are listed.
        let mut worklist: Vec<(String, String)> = vec![(start_id, String::new())];

        while let Some((folder_id, prefix)) = worklist.pop() {
            let children = match self.list_children(drive_id, &folder_id).await {
                Ok(children) => children,
                Err(e) => {
                    warn!(
                        folder = %folder_id,
                        error = %e,
                        "Failed to list folder children; skipping subtree"
                    );
                    folders_skipped += 1;
                    continue;
                }
            };

            let mut subfolders = Vec::new();
            for child in children {
                if child.folder.is_some() {
                    let child_prefix = if structured {
                        join_segments(&prefix, &child.name)
                    } else {
                        String::new()
                    };
                    subfolders.push((child.id, child_prefix));
                    continue;
                }

                let key = if structured {
                    join_segments(&prefix, &child.name)
                } else {
                    child.name.clone()
                };

                let item_id = match ItemId::new(child.id) {
                    Ok(id) => id,
                    Err(e) => {
                        warn!(name = %child.name, error = %e, "Skipping item with unusable id");
                        continue;
                    }
                };

                if let Some(previous) = index.insert(key.clone(), item_id) {
                    debug!(
                        key = %key,
                        previous = %previous,
                        "Basename collision in flat index; keeping latest entry"
                    );
                }
            }

            // Reversed so popping visits siblings in listing order.
            worklist.extend(subfolders.into_iter().rev());
        }

        info!(
            files = index.len(),
            folders_skipped, "Discovery pass complete"
        );

        Ok(DiscoveryOutcome {
            index,
            folders_skipped,
        })
    }

    /// Lists all children of a folder, following pagination
    async fn list_children(
        &self,
        drive_id: &str,
        folder_id: &str,
    ) -> Result<Vec<DriveChild>, DiscoveryError> {
        let path = format!("/drives/{drive_id}/items/{folder_id}/children");
        let mut page: ChildrenPage = self
            .get_json(&path, || {
                DiscoveryError::FolderNotFound(folder_id.to_string())
            })
            .await?;

        let mut children = std::mem::take(&mut page.value);

        while let Some(next_link) = page.next_link.take() {
            debug!(folder = %folder_id, "Following children nextLink");
            let response = self
                .client
                .get_absolute(&next_link)
                .send()
                .await
                .map_err(|e| DiscoveryError::Network(e.to_string()))?;

            page = Self::read_json(response, || {
                DiscoveryError::FolderNotFound(folder_id.to_string())
            })
            .await?;
            children.extend(std::mem::take(&mut page.value));
        }

        Ok(children)
    }

    /// GETs a Graph path and deserializes the JSON body
    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        not_found: impl FnOnce() -> DiscoveryError,
    ) -> Result<T, DiscoveryError> {
        let response = self
            .client
            .request(Method::GET, path)
            .send()
            .await
            .map_err(|e| DiscoveryError::Network(e.to_string()))?;

        Self::read_json(response, not_found).await
    }

    /// Maps a response to a typed payload or a classified discovery error
    async fn read_json<T: DeserializeOwned>(
        response: reqwest::Response,
        not_found: impl FnOnce() -> DiscoveryError,
    ) -> Result<T, DiscoveryError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(match status {
                StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                    DiscoveryError::Unauthorized(body)
                }
                StatusCode::NOT_FOUND => not_found(),
                _ => DiscoveryError::InvalidResponse(format!("status {status}: {body}")),
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|e| DiscoveryError::InvalidResponse(e.to_string()))
    }
}

/// Joins path segments with `/`, skipping an empty prefix
fn join_segments(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{prefix}/{name}")
    }
}
