//! Client-credentials identity material
//!
//! Holds the identifiers needed for an OAuth2 client-credentials token
//! exchange. The client secret itself is *not* a field: it is fetched
//! from the secret provider at authentication time and never persisted.

/// Identity material for the client-credentials grant
///
/// `secret_scope` and `secret_key` address the secret in the external
/// secret provider (see
/// [`ISecretProvider`](crate::ports::secret_provider::ISecretProvider)).
#[derive(Debug, Clone)]
pub struct Credentials {
    /// Azure AD tenant (directory) id
    pub tenant_id: String,
    /// Application (client) id registered for the app
    pub client_id: String,
    /// Secret provider scope holding the client secret
    pub secret_scope: String,
    /// Key of the client secret within the scope
    pub secret_key: String,
}

impl Credentials {
    /// Creates credentials for the given tenant and client
    pub fn new(
        tenant_id: impl Into<String>,
        client_id: impl Into<String>,
        secret_scope: impl Into<String>,
        secret_key: impl Into<String>,
    ) -> Self {
        Self {
            tenant_id: tenant_id.into(),
            client_id: client_id.into(),
            secret_scope: secret_scope.into(),
            secret_key: secret_key.into(),
        }
    }
}
