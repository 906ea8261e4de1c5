//! SiteSync Core - Domain logic and business rules
//!
//! This crate contains the hexagonal architecture core with:
//! - **Domain entities** - `FileIndex`, `Session`, `Credentials`, `SyncReport`
//! - **Error taxonomy** - `AuthError`, `DiscoveryError`, `DownloadError`,
//!   `CompareError`, `ArchiveError`, `SyncError`
//! - **Port definitions** - Traits for adapters: `IDocumentLibrary`, `ISecretProvider`
//! - **Configuration** - YAML-backed typed configuration
//! - **Logging** - tracing subscriber setup for embedding applications
//!
//! # Architecture
//!
//! This crate follows the hexagonal (ports & adapters) architecture pattern.
//! The domain module contains pure business logic with no network or
//! filesystem side effects. Ports define trait interfaces that adapter
//! crates implement: `sitesync-graph` for the Microsoft Graph API and
//! secret storage, `sitesync-sync` for the local synchronization pipeline.

pub mod config;
pub mod domain;
pub mod logging;
pub mod ports;
