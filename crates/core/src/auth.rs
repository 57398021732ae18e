//! Request-Scoped Credential
//!
//! The bearer credential that scopes every data-store read to one user.
//! Passed explicitly as an argument through every layer that needs it
//! (orchestrator, query executors) rather than looked up ambiently.

use serde::{Deserialize, Serialize};

/// Opaque bearer credential supplied by the caller per request.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthToken(String);

impl AuthToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// Redacted Debug so tokens never end up in logs.
impl std::fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("AuthToken(***)")
    }
}
