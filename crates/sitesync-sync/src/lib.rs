//! SiteSync Sync - One-way download synchronization engine
//!
//! Provides:
//! - Format-aware content comparison (xlsx, csv, txt)
//! - Timestamped version archiving before overwrites
//! - The per-file sync pipeline and run-level reporting
//!
//! ## Modules
//!
//! - [`compare`] - decides whether remote content differs from a local file
//! - [`archive`] - preserves the prior version of a file before overwrite
//! - [`engine`] - orchestrates discovery, download, compare, archive, write

pub mod archive;
pub mod compare;
pub mod engine;
