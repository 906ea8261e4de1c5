//! One-way synchronization engine
//!
//! The [`SyncEngine`] orchestrates the download pipeline against a
//! document library:
//!
//! 1. **Discover**: rebuild the file index from the remote tree
//! 2. **Per file**: look up the item id, fetch content, compare against
//!    the local copy, archive the prior version, write atomically
//! 3. **Report**: return a [`SyncReport`] aggregating terminal states
//!
//! Per-file failures are counted and logged but never abort the batch;
//! only authentication and discovery-root failures are run-fatal. Any
//! `Unauthorized` rejection, during discovery or download, marks the
//! session invalid so the caller knows to re-authenticate before the
//! next run; the engine performs no mid-batch re-auth.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use sitesync_core::config::SyncConfig;
use sitesync_core::domain::errors::{DiscoveryError, DownloadError, SyncError};
use sitesync_core::domain::index::{DiscoveryOutcome, FileIndex};
use sitesync_core::domain::report::{FileOutcome, SyncReport};
use sitesync_core::domain::session::Session;
use sitesync_core::ports::document_library::{DiscoveryRoot, IDocumentLibrary};
use tracing::{debug, info, warn};

use crate::archive::VersionArchiver;
use crate::compare::ContentComparator;

// ============================================================================
// SyncOptions
// ============================================================================

/// Behavior knobs for one engine instance
#[derive(Debug, Clone)]
pub struct SyncOptions {
    /// Directory downloaded files are written under
    pub output_dir: PathBuf,
    /// Whether to archive a prior version before overwriting
    pub versioning: bool,
    /// Whether index keys (and local paths) preserve folder structure
    pub structured: bool,
    /// Directory for archived versions; `None` means `./versions`
    pub versions_dir: Option<PathBuf>,
    /// Optional subfolder to start discovery from
    pub folder_path: Option<String>,
}

impl Default for SyncOptions {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("downloads"),
            versioning: true,
            structured: true,
            versions_dir: None,
            folder_path: None,
        }
    }
}

impl From<&SyncConfig> for SyncOptions {
    fn from(config: &SyncConfig) -> Self {
        Self {
            output_dir: config.output_dir.clone(),
            versioning: config.versioning,
            structured: config.structured,
            versions_dir: config.versions_dir.clone(),
            folder_path: config.folder_path.clone(),
        }
    }
}

// ============================================================================
// SyncEngine
// ============================================================================

/// Orchestrates discovery and per-file download synchronization
pub struct SyncEngine {
    library: Arc<dyn IDocumentLibrary>,
    session: Session,
    options: SyncOptions,
    comparator: ContentComparator,
    archiver: VersionArchiver,
    index: Option<FileIndex>,
}

impl SyncEngine {
    /// Creates an engine over an authenticated session
    pub fn new(library: Arc<dyn IDocumentLibrary>, session: Session, options: SyncOptions) -> Self {
        let archiver = match &options.versions_dir {
            Some(dir) => VersionArchiver::new(dir.clone()),
            None => VersionArchiver::default(),
        };

        Self {
            library,
            session,
            options,
            comparator: ContentComparator::new(),
            archiver,
            index: None,
        }
    }

    /// The session this engine runs under
    ///
    /// After a run, `is_active() == false` means the remote API rejected
    /// the token and the caller must re-authenticate.
    #[must_use]
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Rebuilds the file index from the remote tree
    ///
    /// Replaces any previously discovered index in full.
    pub async fn discover_files(&mut self) -> Result<DiscoveryOutcome, SyncError> {
        let root = DiscoveryRoot::from_folder_path(self.options.folder_path.as_deref());
        let outcome = match self.library.discover(&root, self.options.structured).await {
            Ok(outcome) => outcome,
            Err(e) => {
                if let DiscoveryError::Unauthorized(reason) = &e {
                    warn!(reason = %reason, "Token rejected; session invalidated");
                    self.session.invalidate();
                }
                return Err(e.into());
            }
        };

        if outcome.is_partial() {
            warn!(
                folders_skipped = outcome.folders_skipped,
                "Discovery was partial; some subtrees were not indexed"
            );
        }
        info!(files = outcome.files_discovered(), "File index rebuilt");

        self.index = Some(outcome.index.clone());
        Ok(outcome)
    }

    /// Logical paths known to the current index, in deterministic order
    ///
    /// # Errors
    /// Returns [`SyncError::NotDiscovered`] before the first discovery pass.
    pub fn list_files(&self) -> Result<Vec<String>, SyncError> {
        let index = self.index.as_ref().ok_or(SyncError::NotDiscovered)?;
        Ok(index.paths().map(str::to_string).collect())
    }

    /// Number of files in the current index (zero before discovery)
    #[must_use]
    pub fn file_count(&self) -> usize {
        self.index.as_ref().map_or(0, FileIndex::len)
    }

    /// Synchronizes every file in the index
    ///
    /// Runs a discovery pass first when none has happened yet.
    pub async fn sync_all(&mut self) -> Result<SyncReport, SyncError> {
        if self.index.is_none() {
            self.discover_files().await?;
        }
        let paths = self.list_files()?;
        Ok(self.run(paths).await)
    }

    /// Synchronizes only the named logical paths
    ///
    /// Paths absent from the index end as [`FileOutcome::NotFound`] in
    /// the report; they do not abort the batch.
    ///
    /// # Errors
    /// Returns [`SyncError::NotDiscovered`] before the first discovery pass.
    pub async fn sync_subset(&mut self, paths: &[String]) -> Result<SyncReport, SyncError> {
        if self.index.is_none() {
            return Err(SyncError::NotDiscovered);
        }
        Ok(self.run(paths.to_vec()).await)
    }

    /// Processes the given paths into a report
    async fn run(&mut self, paths: Vec<String>) -> SyncReport {
        let start = Instant::now();
        let mut report = SyncReport::new();

        info!(files = paths.len(), "Starting sync run");

        for path in paths {
            let outcome = self.process_file(&path).await;
            debug!(file = %path, outcome = %outcome, "File processed");
            report.record(path, outcome);
        }

        report.duration_ms = start.elapsed().as_millis() as u64;
        info!(%report, "Sync run complete");
        report
    }

    /// Drives one file to its terminal state
    async fn process_file(&mut self, path: &str) -> FileOutcome {
        // Lookup
        let Some(item_id) = self.index.as_ref().and_then(|index| index.get(path)) else {
            warn!(file = %path, "Not present in the file index");
            return FileOutcome::NotFound;
        };
        let item_id = item_id.clone();

        // Fetch
        let bytes = match self.library.download(&item_id).await {
            Ok(bytes) => bytes,
            Err(DownloadError::Unauthorized(reason)) => {
                warn!(file = %path, reason = %reason, "Token rejected; session invalidated");
                self.session.invalidate();
                return FileOutcome::DownloadFailed;
            }
            Err(e) => {
                warn!(file = %path, error = %e, "Download failed");
                return FileOutcome::DownloadFailed;
            }
        };

        // Decide + archive. With versioning off the remote copy always
        // wins, no comparison.
        let target = self.options.output_dir.join(path);
        if self.options.versioning && target.exists() {
            if !self.comparator.differs(&bytes, &target) {
                debug!(file = %path, "Local copy unchanged");
                return FileOutcome::SkippedUnchanged;
            }
            // Best-effort: an archive failure never blocks the overwrite.
            if let Err(e) = self.archiver.archive(&target) {
                warn!(file = %path, error = %e, "Version archiving failed; overwriting anyway");
            }
        }

        // Write
        match write_atomic(&target, &bytes).await {
            Ok(()) => {
                info!(file = %path, bytes = bytes.len(), "Saved");
                FileOutcome::Saved
            }
            Err(e) => {
                warn!(file = %path, error = %e, "Write failed");
                FileOutcome::WriteFailed
            }
        }
    }
}

/// Writes via temp + rename so a crash never leaves a partial file
async fn write_atomic(target: &Path, data: &[u8]) -> std::io::Result<()> {
    if let Some(parent) = target.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }

    // Temp file in the same directory so the rename stays on one filesystem.
    let tmp_path = {
        let mut p = target.as_os_str().to_owned();
        p.push(".tmp");
        PathBuf::from(p)
    };

    tokio::fs::write(&tmp_path, data).await?;
    tokio::fs::rename(&tmp_path, target).await?;
    Ok(())
}
