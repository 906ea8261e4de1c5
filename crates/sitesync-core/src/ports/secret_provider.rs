//! Secret provider port (driven/secondary port)
//!
//! Opaque secret retrieval for the OAuth2 client secret. The production
//! implementation is backed by the OS credential store (`sitesync-graph`);
//! tests use an in-memory map.

use crate::domain::errors::AuthError;

/// Port trait for fetching named secrets
///
/// Implementations must fail loudly (return `AuthError::SecretUnavailable`)
/// when the scope/key pair is absent: an empty or defaulted secret must
/// never silently flow into a token exchange.
pub trait ISecretProvider: Send + Sync {
    /// Retrieves the secret stored under `scope`/`key`
    fn get(&self, scope: &str, key: &str) -> Result<String, AuthError>;
}
