//! Per-run sync aggregate
//!
//! Every file processed by the engine reaches exactly one terminal
//! state, and each terminal state increments exactly one counter. The
//! report is returned to the caller (not merely logged) so the aggregate
//! is observable programmatically.

use std::fmt::{self, Display, Formatter};

/// Terminal state of a single file's sync attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileOutcome {
    /// Downloaded content was written to the target path
    Saved,
    /// Local copy already matched the remote content; nothing written
    SkippedUnchanged,
    /// The logical path was absent from the file index
    NotFound,
    /// The remote fetch failed (non-success status or transport error)
    DownloadFailed,
    /// The local write failed after a successful fetch
    WriteFailed,
}

impl FileOutcome {
    /// Whether this outcome counts as a failure
    #[must_use]
    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            Self::NotFound | Self::DownloadFailed | Self::WriteFailed
        )
    }
}

impl Display for FileOutcome {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Saved => "saved",
            Self::SkippedUnchanged => "skipped (unchanged)",
            Self::NotFound => "not found in index",
            Self::DownloadFailed => "download failed",
            Self::WriteFailed => "write failed",
        };
        write!(f, "{label}")
    }
}

/// Aggregate outcome of one engine invocation
#[derive(Debug, Clone, Default)]
pub struct SyncReport {
    /// Files the engine attempted to process
    pub attempted: u32,
    /// Files downloaded and written
    pub saved: u32,
    /// Files skipped because the local copy was unchanged
    pub skipped_unchanged: u32,
    /// Files that ended in a failure outcome
    pub failed: u32,
    /// Per-file terminal states in processing order
    pub outcomes: Vec<(String, FileOutcome)>,
    /// Wall-clock duration of the run in milliseconds
    pub duration_ms: u64,
}

impl SyncReport {
    /// Creates an empty report
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one file's terminal state, bumping exactly one counter
    pub fn record(&mut self, path: impl Into<String>, outcome: FileOutcome) {
        self.attempted += 1;
        match outcome {
            FileOutcome::Saved => self.saved += 1,
            FileOutcome::SkippedUnchanged => self.skipped_unchanged += 1,
            FileOutcome::NotFound | FileOutcome::DownloadFailed | FileOutcome::WriteFailed => {
                self.failed += 1;
            }
        }
        self.outcomes.push((path.into(), outcome));
    }

    /// Files that completed without failure (saved or skipped)
    #[must_use]
    pub fn succeeded(&self) -> u32 {
        self.saved + self.skipped_unchanged
    }
}

impl Display for SyncReport {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} attempted, {} saved, {} unchanged, {} failed in {} ms",
            self.attempted, self.saved, self.skipped_unchanged, self.failed, self.duration_ms
        )
    }
}
