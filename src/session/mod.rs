//! Admin session and credential injection.
//!
//! The bearer credential used by the record source and mutation sink is owned
//! by a top-level session manager outside the roster core and passed in
//! explicitly — never read from ambient global state. The moderation workflow
//! treats an absent credential as a hard precondition failure and refuses to
//! dispatch the call.

use std::env;
use std::fmt;

/// Environment variable consulted by [`Session::from_env`].
pub const TOKEN_ENV_VAR: &str = "ROSTERDECK_ADMIN_TOKEN";

/// Injected admin credential holder.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Session {
    bearer: Option<String>,
}

impl Session {
    /// Creates a session with an optional bearer token.
    #[must_use]
    pub fn new(bearer: Option<String>) -> Self {
        Self { bearer }
    }

    /// Builds a session from the `ROSTERDECK_ADMIN_TOKEN` environment
    /// variable; empty values count as absent.
    #[must_use]
    pub fn from_env() -> Self {
        let bearer = env::var(TOKEN_ENV_VAR)
            .ok()
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty());
        Self { bearer }
    }

    /// The bearer token, when present.
    #[must_use]
    pub fn bearer(&self) -> Option<&str> {
        self.bearer.as_deref()
    }

    /// Whether a credential is present.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.bearer.is_some()
    }

    /// Replaces the credential (sign-in).
    pub fn set_bearer(&mut self, token: String) {
        self.bearer = Some(token);
    }

    /// Drops the credential (sign-out).
    pub fn clear(&mut self) {
        self.bearer = None;
    }
}

// Keep the token out of debug output and logs.
impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field(
                "bearer",
                &self.bearer.as_ref().map(|_| "<redacted>"),
            )
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_session_is_unauthenticated() {
        let session = Session::default();
        assert!(!session.is_authenticated());
        assert!(session.bearer().is_none());
    }

    #[test]
    fn debug_redacts_token() {
        let session = Session::new(Some("secret-token".to_string()));
        let rendered = format!("{session:?}");
        assert!(!rendered.contains("secret-token"));
    }
}
