//! Version archiving
//!
//! Before a changed file is overwritten, its current content is copied
//! into the versions directory under a timestamped name:
//! `report.xlsx` becomes `report_20260823_143055.xlsx`. The copy also
//! carries the source's modification and access times, so the archived
//! version still reflects when its content was last written.
//!
//! Two archives of the same file within one second collide on the same
//! name and the later copy wins. Archival is best-effort from the
//! engine's point of view: errors here never block the overwrite.

use std::fs::{self, File, FileTimes};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use sitesync_core::domain::errors::ArchiveError;
use tracing::{debug, info};

/// Timestamp layout embedded in archived file names
const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Copies prior file versions into a timestamped archive directory
#[derive(Debug, Clone)]
pub struct VersionArchiver {
    versions_dir: PathBuf,
}

impl Default for VersionArchiver {
    fn default() -> Self {
        Self::new("versions")
    }
}

impl VersionArchiver {
    /// Creates an archiver writing into the given directory
    ///
    /// The directory is created lazily on the first archive.
    pub fn new(versions_dir: impl Into<PathBuf>) -> Self {
        Self {
            versions_dir: versions_dir.into(),
        }
    }

    /// The directory archived versions are written into
    #[must_use]
    pub fn versions_dir(&self) -> &Path {
        &self.versions_dir
    }

    /// Archives the current content of `file`, returning the archive path
    ///
    /// # Errors
    ///
    /// - [`ArchiveError::SourceMissing`] when `file` does not exist
    /// - [`ArchiveError::Io`] when the directory or copy fails
    pub fn archive(&self, file: &Path) -> Result<PathBuf, ArchiveError> {
        self.archive_with_timestamp(file, Local::now())
    }

    fn archive_with_timestamp(
        &self,
        file: &Path,
        timestamp: DateTime<Local>,
    ) -> Result<PathBuf, ArchiveError> {
        if !file.exists() {
            return Err(ArchiveError::SourceMissing(file.to_path_buf()));
        }

        fs::create_dir_all(&self.versions_dir).map_err(|e| ArchiveError::Io {
            path: self.versions_dir.clone(),
            source: e,
        })?;

        let destination = self
            .versions_dir
            .join(archived_name(file, &timestamp));

        debug!(
            source = %file.display(),
            destination = %destination.display(),
            "Archiving prior version"
        );

        fs::copy(file, &destination).map_err(|e| ArchiveError::Io {
            path: destination.clone(),
            source: e,
        })?;
        carry_timestamps(file, &destination)?;

        info!(archived = %destination.display(), "Prior version preserved");
        Ok(destination)
    }
}

/// Builds `<stem>_<timestamp><.ext>` for the archive copy
fn archived_name(file: &Path, timestamp: &DateTime<Local>) -> String {
    let stem = file
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let formatted = timestamp.format(TIMESTAMP_FORMAT);

    match file.extension() {
        Some(ext) => format!("{stem}_{formatted}.{}", ext.to_string_lossy()),
        None => format!("{stem}_{formatted}"),
    }
}

/// Propagates the source's accessed and modified times onto the copy
fn carry_timestamps(source: &Path, destination: &Path) -> Result<(), ArchiveError> {
    let io_err = |path: &Path| {
        let path = path.to_path_buf();
        move |e: std::io::Error| ArchiveError::Io { path, source: e }
    };

    let metadata = fs::metadata(source).map_err(io_err(source))?;
    let modified = metadata.modified().map_err(io_err(source))?;
    let accessed = metadata.accessed().map_err(io_err(source))?;

    let dest_file = File::options()
        .write(true)
        .open(destination)
        .map_err(io_err(destination))?;
    dest_file
        .set_times(
            FileTimes::new()
                .set_accessed(accessed)
                .set_modified(modified),
        )
        .map_err(io_err(destination))?;

    Ok(())
}
