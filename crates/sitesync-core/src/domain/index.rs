//! File index - logical path → remote item id
//!
//! The index is rebuilt in full on every discovery pass and lives only
//! in memory for the duration of a sync run. Keys are logical relative
//! paths with forward-slash segments (or bare file names in flat mode);
//! values are opaque remote item ids.

use std::collections::BTreeMap;

use super::newtypes::ItemId;

/// Mapping of logical relative paths to remote item identifiers
///
/// Backed by a `BTreeMap` so iteration (and therefore per-file
/// processing order) is deterministic. Inserting an existing key
/// replaces the previous id; this is how flat-mode basename collisions
/// silently resolve to the last file discovered.
#[derive(Debug, Clone, Default)]
pub struct FileIndex {
    entries: BTreeMap<String, ItemId>,
}

impl FileIndex {
    /// Creates an empty index
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces an entry, returning the previous id if any
    pub fn insert(&mut self, path: impl Into<String>, id: ItemId) -> Option<ItemId> {
        self.entries.insert(path.into(), id)
    }

    /// Looks up the remote id for a logical path
    #[must_use]
    pub fn get(&self, path: &str) -> Option<&ItemId> {
        self.entries.get(path)
    }

    /// Returns true if the path is present
    #[must_use]
    pub fn contains(&self, path: &str) -> bool {
        self.entries.contains_key(path)
    }

    /// Number of indexed files
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no files were discovered
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over logical paths in deterministic order
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Iterates over `(path, id)` pairs in deterministic order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ItemId)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

/// Result of a discovery pass
///
/// Carries the rebuilt index together with the counts the run report
/// needs: how many files were found and how many subtrees had to be
/// skipped because their children listing failed (partial discovery).
#[derive(Debug, Clone)]
pub struct DiscoveryOutcome {
    /// The freshly rebuilt file index
    pub index: FileIndex,
    /// Number of folders whose children listing failed and were skipped
    pub folders_skipped: u32,
}

impl DiscoveryOutcome {
    /// Number of files discovered
    #[must_use]
    pub fn files_discovered(&self) -> usize {
        self.index.len()
    }

    /// Whether any subtree was skipped
    #[must_use]
    pub fn is_partial(&self) -> bool {
        self.folders_skipped > 0
    }
}
