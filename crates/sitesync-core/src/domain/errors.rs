//! Error taxonomy shared across the workspace
//!
//! Each pipeline stage has its own error enum so callers can distinguish
//! run-fatal conditions (authentication, discovery-root resolution) from
//! per-file conditions that are counted and logged but never abort the
//! batch (download, write), and from conditions that degrade to a
//! conservative default (comparison, archival).

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while constructing domain values
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Invalid remote item identifier
    #[error("Invalid item ID: {0}")]
    InvalidItemId(String),

    /// Invalid logical path for an index entry
    #[error("Invalid logical path: {0}")]
    InvalidLogicalPath(String),
}

/// Errors raised during authentication
///
/// Authentication failures abort the whole run; there is nothing to sync
/// against without a bearer token. The flow performs no internal retry;
/// the caller decides whether to re-run the pipeline.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The secret provider could not supply the client secret
    #[error("Secret unavailable for scope '{scope}', key '{key}': {reason}")]
    SecretUnavailable {
        /// Secret provider scope (service / vault name)
        scope: String,
        /// Key within the scope
        key: String,
        /// Provider-specific failure description
        reason: String,
    },

    /// The token endpoint rejected the exchange or could not be reached
    #[error("Token exchange failed: {0}")]
    TokenExchange(String),

    /// The token endpoint answered successfully but without a usable token
    #[error("Token response did not contain an access token")]
    MissingToken,

    /// The configured token endpoint URL is malformed
    #[error("Invalid token endpoint URL: {0}")]
    InvalidEndpoint(String),
}

/// Errors raised while resolving and walking the remote tree
///
/// Failures resolving the discovery root (site, library, starting folder)
/// are terminal for the run. A failure listing one folder's children is
/// *not* represented here; it degrades to a skipped subtree recorded on
/// the [`DiscoveryOutcome`](crate::domain::index::DiscoveryOutcome).
#[derive(Debug, Error)]
pub enum DiscoveryError {
    /// The site name did not resolve to a site id
    #[error("Site not found: {0}")]
    SiteNotFound(String),

    /// No drive on the site matched the document library display name
    #[error("Document library not found: {0}")]
    LibraryNotFound(String),

    /// The requested starting subfolder does not exist in the library
    #[error("Folder not found: {0}")]
    FolderNotFound(String),

    /// The bearer token was rejected
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// A transport-level failure reaching the remote API
    #[error("Network error during discovery: {0}")]
    Network(String),

    /// The remote API returned a payload that could not be interpreted
    #[error("Invalid discovery response: {0}")]
    InvalidResponse(String),
}

/// Errors raised while fetching a single file's content
///
/// These are per-file conditions: the engine counts them as failed and
/// continues with the rest of the batch.
#[derive(Debug, Error)]
pub enum DownloadError {
    /// The bearer token was rejected; the session must be re-established
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// The remote item id no longer exists
    #[error("Remote item not found: {0}")]
    NotFound(String),

    /// The remote API returned a non-success status
    #[error("Download returned status {status}: {reason}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Response description
        reason: String,
    },

    /// A transport-level failure reaching the remote API
    #[error("Network error during download: {0}")]
    Network(String),

    /// Download was attempted before the library was resolved
    #[error("Document library not resolved; run discovery first")]
    Unresolved,
}

/// Errors raised while comparing downloaded bytes against a local file
///
/// Never surfaced as a hard failure: the comparator maps any of these to
/// "differs" so a parse failure forces an overwrite instead of silently
/// preserving possibly-stale content.
#[derive(Debug, Error)]
pub enum CompareError {
    /// The local file could not be read
    #[error("Failed to read local file {path}: {source}")]
    LocalRead {
        /// Local file path
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// A tabular or text payload could not be parsed
    #[error("Failed to parse {format} content: {reason}")]
    Parse {
        /// Format being parsed ("xlsx", "csv", "utf-8 text")
        format: &'static str,
        /// Parser-specific failure description
        reason: String,
    },
}

/// Errors raised while archiving a prior version of a local file
///
/// Archival is best-effort: the engine logs these and proceeds with the
/// overwrite.
#[derive(Debug, Error)]
pub enum ArchiveError {
    /// The source file vanished between the archive decision and the copy
    #[error("Source file missing: {0}")]
    SourceMissing(PathBuf),

    /// The archive directory or file could not be created
    #[error("Archive I/O error for {path}: {source}")]
    Io {
        /// Path being written or created
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },
}

/// Run-level errors from the sync engine
///
/// Per-file failures never produce a `SyncError`; they are folded into
/// the [`SyncReport`](crate::domain::report::SyncReport) counters.
#[derive(Debug, Error)]
pub enum SyncError {
    /// A subset sync was requested before any discovery pass
    #[error("No file index present; run discovery first")]
    NotDiscovered,

    /// The automatic discovery pass of `sync_all` failed
    #[error(transparent)]
    Discovery(#[from] DiscoveryError),
}
