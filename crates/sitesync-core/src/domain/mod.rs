//! Domain layer - entities and value objects
//!
//! Pure business types with no network or filesystem side effects:
//!
//! - [`credentials::Credentials`] - client-credentials identity material
//! - [`session::Session`] - bearer token with explicit lifecycle
//! - [`index::FileIndex`] - logical path → remote item id mapping
//! - [`report::SyncReport`] - per-run aggregate outcome counters
//! - [`errors`] - the typed error taxonomy shared across crates
//! - [`newtypes`] - validated identifier wrappers

pub mod credentials;
pub mod errors;
pub mod index;
pub mod newtypes;
pub mod report;
pub mod session;

pub use credentials::Credentials;
pub use index::{DiscoveryOutcome, FileIndex};
pub use report::{FileOutcome, SyncReport};
pub use session::Session;
