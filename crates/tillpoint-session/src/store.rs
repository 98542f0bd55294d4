//! Local session storage.

use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::{SystemTime, UNIX_EPOCH};

use tillpoint_domain::identity::IdentityContext;

/// Access token as held by the client, with its `exp` (seconds since epoch).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredToken {
    pub access_token: String,
    pub expires_at: u64,
}

impl StoredToken {
    pub fn is_live(&self, now_secs: u64) -> bool {
        self.expires_at > now_secs
    }
}

/// Client-side session state: the access token and the cached identity.
pub trait SessionStore: Send + Sync {
    /// The stored access token, if one is present and not yet expired.
    fn live_token(&self, now_secs: u64) -> Option<String>;

    /// Store a new access token. A different token starts a new session, so
    /// any identity cached for the previous one is dropped.
    fn set_token(&self, token: StoredToken);

    fn identity(&self) -> Option<IdentityContext>;

    fn set_identity(&self, identity: IdentityContext);

    fn clear_identity(&self);

    /// Drop the token and the cached identity.
    fn clear(&self);
}

#[derive(Default)]
struct Inner {
    token: Option<StoredToken>,
    identity: Option<IdentityContext>,
}

/// In-process [`SessionStore`].
#[derive(Default)]
pub struct MemorySessionStore {
    inner: Mutex<Inner>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl SessionStore for MemorySessionStore {
    fn live_token(&self, now_secs: u64) -> Option<String> {
        self.lock()
            .token
            .as_ref()
            .filter(|t| t.is_live(now_secs))
            .map(|t| t.access_token.clone())
    }

    fn set_token(&self, token: StoredToken) {
        let mut inner = self.lock();
        let same_token = inner
            .token
            .as_ref()
            .is_some_and(|t| t.access_token == token.access_token);
        if !same_token {
            inner.identity = None;
        }
        inner.token = Some(token);
    }

    fn identity(&self) -> Option<IdentityContext> {
        self.lock().identity.clone()
    }

    fn set_identity(&self, identity: IdentityContext) {
        self.lock().identity = Some(identity);
    }

    fn clear_identity(&self) {
        self.lock().identity = None;
    }

    fn clear(&self) {
        let mut inner = self.lock();
        inner.token = None;
        inner.identity = None;
    }
}

pub(crate) fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}
