//! Authenticated session with explicit lifecycle
//!
//! A [`Session`] is created by a successful token exchange and passed by
//! value into the sync engine, never held as process-wide ambient state.
//! Token lifetime is not tracked proactively: expiry is discovered
//! reactively when the remote API rejects a call, at which point the
//! engine marks the session invalid and the caller must re-authenticate.

use chrono::{DateTime, Utc};

/// A bearer token together with its issue time and validity flag
#[derive(Debug, Clone)]
pub struct Session {
    access_token: String,
    issued_at: DateTime<Utc>,
    invalidated: bool,
}

impl Session {
    /// Creates a new active session issued now
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            issued_at: Utc::now(),
            invalidated: false,
        }
    }

    /// The bearer token for `Authorization` headers
    #[must_use]
    pub fn access_token(&self) -> &str {
        &self.access_token
    }

    /// When the token was issued
    #[must_use]
    pub fn issued_at(&self) -> DateTime<Utc> {
        self.issued_at
    }

    /// Whether the session is still usable
    ///
    /// Returns `false` once the remote API has rejected the token with
    /// an auth error. An invalidated session is never reactivated.
    #[must_use]
    pub fn is_active(&self) -> bool {
        !self.invalidated
    }

    /// Marks the session unusable after the remote API rejected it
    pub fn invalidate(&mut self) {
        self.invalidated = true;
    }
}
