//! Integration tests for sitesync-sync
//!
//! Drives the engine end-to-end against an in-memory document library
//! and a temporary output directory.

mod common;
