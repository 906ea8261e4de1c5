//! SiteSync Graph - Microsoft Graph API adapter
//!
//! Provides the remote half of the sync pipeline:
//! - OAuth2 authentication (client-credentials grant)
//! - SharePoint site / document library / folder resolution
//! - Remote tree discovery into a flat file index
//! - Raw content download by item id
//!
//! ## Modules
//!
//! - [`auth`] - client-credentials flow and the keyring secret provider
//! - [`client`] - Microsoft Graph HTTP client
//! - [`discovery`] - remote tree indexer (site → drive → folder → children)
//! - [`provider`] - [`IDocumentLibrary`] implementation tying it together
//!
//! [`IDocumentLibrary`]: sitesync_core::ports::document_library::IDocumentLibrary

pub mod auth;
pub mod client;
pub mod discovery;
pub mod provider;
