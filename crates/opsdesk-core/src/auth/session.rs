//! Session store.
//!
//! The bearer token is process-wide state with an explicit lifecycle: it is
//! set once at login, cleared at logout, and only read in between. Clients
//! receive it through [`SessionProvider`] so tests can inject their own.

use std::sync::{Arc, PoisonError, RwLock};

use tracing::debug;

use super::tokens::AccessToken;

/// Read side of the session: where authorized requests get their token.
///
/// A missing token is not an error here. Requests go out without a
/// credential and the server answers with an authorization failure.
pub trait SessionProvider: Send + Sync {
    /// The current token, if a session is active.
    fn access_token(&self) -> Option<AccessToken>;
}

/// Write side of the session, used only at login and logout.
pub trait SessionStore: SessionProvider {
    /// Start a session with the token issued at login.
    fn begin(&self, token: AccessToken);

    /// End the session.
    fn end(&self);

    fn is_active(&self) -> bool {
        self.access_token().is_some()
    }
}

impl<T: SessionProvider + ?Sized> SessionProvider for Arc<T> {
    fn access_token(&self) -> Option<AccessToken> {
        (**self).access_token()
    }
}

impl<T: SessionStore + ?Sized> SessionStore for Arc<T> {
    fn begin(&self, token: AccessToken) {
        (**self).begin(token)
    }

    fn end(&self) {
        (**self).end()
    }
}

/// In-memory session store.
///
/// Cheap to clone; clones share the same token slot. The token is replaced
/// as a whole, so readers never observe a partial write.
#[derive(Clone, Default)]
pub struct MemorySession {
    token: Arc<RwLock<Option<AccessToken>>>,
}

impl MemorySession {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that already holds `token`, e.g. restored from disk.
    pub fn with_token(token: AccessToken) -> Self {
        Self {
            token: Arc::new(RwLock::new(Some(token))),
        }
    }
}

impl SessionProvider for MemorySession {
    fn access_token(&self) -> Option<AccessToken> {
        self.token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl SessionStore for MemorySession {
    fn begin(&self, token: AccessToken) {
        debug!("Session started");
        *self.token.write().unwrap_or_else(PoisonError::into_inner) = Some(token);
    }

    fn end(&self) {
        debug!("Session ended");
        *self.token.write().unwrap_or_else(PoisonError::into_inner) = None;
    }
}

impl std::fmt::Debug for MemorySession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemorySession")
            .field("active", &self.is_active())
            .field("token", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lifecycle_begin_and_end() {
        let session = MemorySession::new();
        assert!(session.access_token().is_none());

        session.begin(AccessToken::new("t1"));
        assert_eq!(session.access_token().unwrap().as_str(), "t1");

        session.end();
        assert!(!session.is_active());
    }

    #[test]
    fn clones_share_state() {
        let session = MemorySession::new();
        let reader: Arc<dyn SessionProvider> = Arc::new(session.clone());

        session.begin(AccessToken::new("shared"));
        assert_eq!(reader.access_token().unwrap().as_str(), "shared");
    }

    #[test]
    fn debug_redacts_token() {
        let session = MemorySession::with_token(AccessToken::new("supersecret"));
        let debug = format!("{:?}", session);
        assert!(!debug.contains("supersecret"));
    }
}
