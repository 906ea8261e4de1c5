//! Port definitions (hexagonal architecture interfaces)
//!
//! Ports are the trait boundaries the domain core depends on; their
//! implementations live in adapter crates.
//!
//! ## Ports Overview
//!
//! - [`IDocumentLibrary`] - remote tree discovery and content download
//!   (Microsoft Graph adapter in `sitesync-graph`)
//! - [`ISecretProvider`] - opaque secret retrieval for the client secret
//!   (keyring adapter in `sitesync-graph`)

pub mod document_library;
pub mod secret_provider;

pub use document_library::{DiscoveryRoot, IDocumentLibrary};
pub use secret_provider::ISecretProvider;
