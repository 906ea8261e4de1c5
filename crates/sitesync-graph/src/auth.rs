//! OAuth2 client-credentials authentication for Microsoft Graph
//!
//! Implements the client-credentials grant (RFC 6749 §4.4) for
//! daemon-style access to a SharePoint document library: no user
//! interaction, the client secret comes from an external secret
//! provider at exchange time and is never persisted.
//!
//! ## Components
//!
//! - [`KeyringSecretProvider`] - secret retrieval from the OS credential store
//! - [`ClientCredentialsFlow`] - token exchange producing a [`Session`]

use oauth2::basic::BasicClient;
use oauth2::{AuthType, ClientId, ClientSecret, Scope, TokenResponse, TokenUrl};
use sitesync_core::domain::credentials::Credentials;
use sitesync_core::domain::errors::AuthError;
use sitesync_core::domain::session::Session;
use sitesync_core::ports::secret_provider::ISecretProvider;
use tracing::{debug, info};

/// Microsoft identity platform token endpoint, parameterized by tenant
const TOKEN_URL_TEMPLATE: &str = "https://login.microsoftonline.com/{tenant}/oauth2/v2.0/token";

/// Default OAuth2 scope for application access to Microsoft Graph
const GRAPH_DEFAULT_SCOPE: &str = "https://graph.microsoft.com/.default";

// ============================================================================
// KeyringSecretProvider
// ============================================================================

/// Secret provider backed by the OS credential store
///
/// Uses the `keyring` crate (GNOME Keyring, KDE Wallet, macOS Keychain).
/// The provider `scope` maps to the keyring service name and the `key`
/// to the username, so a secret stored for service `sitesync` under user
/// `sp-client-secret` is addressed as `get("sitesync", "sp-client-secret")`.
#[derive(Debug, Clone, Default)]
pub struct KeyringSecretProvider;

impl KeyringSecretProvider {
    /// Creates a new keyring-backed secret provider
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl ISecretProvider for KeyringSecretProvider {
    fn get(&self, scope: &str, key: &str) -> Result<String, AuthError> {
        let entry =
            keyring::Entry::new(scope, key).map_err(|e| AuthError::SecretUnavailable {
                scope: scope.to_string(),
                key: key.to_string(),
                reason: format!("failed to open keyring entry: {e}"),
            })?;

        match entry.get_password() {
            Ok(secret) => {
                debug!(scope, key, "Retrieved secret from keyring");
                Ok(secret)
            }
            Err(keyring::Error::NoEntry) => Err(AuthError::SecretUnavailable {
                scope: scope.to_string(),
                key: key.to_string(),
                reason: "no such keyring entry".to_string(),
            }),
            Err(e) => Err(AuthError::SecretUnavailable {
                scope: scope.to_string(),
                key: key.to_string(),
                reason: e.to_string(),
            }),
        }
    }
}

// ============================================================================
// ClientCredentialsFlow
// ============================================================================

/// OAuth2 client-credentials flow using the `oauth2` crate
///
/// Exchanges the client id and a freshly fetched client secret for a
/// bearer token at the tenant's token endpoint. Performs no retry: a
/// failed exchange surfaces as [`AuthError`] and the caller decides
/// whether to re-run the pipeline.
pub struct ClientCredentialsFlow {
    token_url_override: Option<String>,
    scope: String,
}

impl Default for ClientCredentialsFlow {
    fn default() -> Self {
        Self::new()
    }
}

impl ClientCredentialsFlow {
    /// Creates a flow targeting the Microsoft identity platform
    #[must_use]
    pub fn new() -> Self {
        Self {
            token_url_override: None,
            scope: GRAPH_DEFAULT_SCOPE.to_string(),
        }
    }

    /// Overrides the token endpoint URL (useful for testing)
    #[must_use]
    pub fn with_token_url(mut self, url: impl Into<String>) -> Self {
        self.token_url_override = Some(url.into());
        self
    }

    /// Overrides the requested scope
    #[must_use]
    pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = scope.into();
        self
    }

    /// The token endpoint URL this flow will use for the given tenant
    #[must_use]
    pub fn token_url(&self, tenant_id: &str) -> String {
        match &self.token_url_override {
            Some(url) => url.clone(),
            None => TOKEN_URL_TEMPLATE.replace("{tenant}", tenant_id),
        }
    }

    /// Performs the client-credentials token exchange
    ///
    /// Fetches the client secret from the secret provider, POSTs
    /// `grant_type=client_credentials` with `client_id`, `client_secret`
    /// and `scope` in the request body, and returns an active [`Session`]
    /// wrapping the `access_token` field of the response.
    ///
    /// # Errors
    ///
    /// - [`AuthError::SecretUnavailable`] when the secret cannot be fetched
    /// - [`AuthError::TokenExchange`] when the endpoint rejects the
    ///   exchange or cannot be reached
    /// - [`AuthError::MissingToken`] when the response cannot be read as
    ///   a token (including a missing `access_token` field)
    pub async fn authenticate(
        &self,
        credentials: &Credentials,
        secrets: &dyn ISecretProvider,
    ) -> Result<Session, AuthError> {
        let secret = secrets.get(&credentials.secret_scope, &credentials.secret_key)?;

        let token_url = TokenUrl::new(self.token_url(&credentials.tenant_id))
            .map_err(|e| AuthError::InvalidEndpoint(e.to_string()))?;

        // The Microsoft identity platform expects the client id and
        // secret in the form body, not as HTTP Basic auth.
        let oauth_client = BasicClient::new(ClientId::new(credentials.client_id.clone()))
            .set_client_secret(ClientSecret::new(secret))
            .set_token_uri(token_url)
            .set_auth_type(AuthType::RequestBody);

        info!(
            tenant = %credentials.tenant_id,
            client = %credentials.client_id,
            "Exchanging client credentials for a bearer token"
        );

        let http_client = reqwest::Client::new();
        let token_result = oauth_client
            .exchange_client_credentials()
            .add_scope(Scope::new(self.scope.clone()))
            .request_async(&http_client)
            .await
            .map_err(|e| match e {
                oauth2::RequestTokenError::Parse(..) => AuthError::MissingToken,
                other => AuthError::TokenExchange(other.to_string()),
            })?;

        let access_token = token_result.access_token().secret();
        if access_token.is_empty() {
            return Err(AuthError::MissingToken);
        }

        info!("Authentication successful");
        Ok(Session::new(access_token.clone()))
    }
}
