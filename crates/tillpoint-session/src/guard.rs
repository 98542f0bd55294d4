//! Navigation guard for protected views.

use tokio::sync::Mutex;
use tracing::{debug, warn};
use url::form_urlencoded;

use tillpoint_domain::identity::IdentityContext;

use crate::config::SessionConfig;
use crate::fetcher::IdentityFetcher;
use crate::store::{SessionStore, now_secs};

/// What the router should do with a navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardOutcome {
    /// Render the requested view for this identity.
    Proceed(IdentityContext),
    /// Navigate to this sign-in location instead.
    Redirect(String),
}

/// Confirms a session before a protected view renders.
///
/// The identity is fetched at most once per session and cached in the store.
/// Concurrent navigations wait on the same fetch instead of issuing their own.
pub struct SessionGuard<S: SessionStore, F: IdentityFetcher> {
    store: S,
    fetcher: F,
    sign_in_path: String,
    fetch_lock: Mutex<()>,
}

impl<S: SessionStore, F: IdentityFetcher> SessionGuard<S, F> {
    pub fn new(store: S, fetcher: F, config: &SessionConfig) -> Self {
        Self {
            store,
            fetcher,
            sign_in_path: config.sign_in_path.clone(),
            fetch_lock: Mutex::new(()),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Decide whether navigation to `requested` may proceed.
    pub async fn guard(&self, requested: &str) -> GuardOutcome {
        let Some(token) = self.store.live_token(now_secs()) else {
            debug!("no live session token");
            self.store.clear_identity();
            return self.redirect(requested);
        };

        if let Some(identity) = self.store.identity() {
            return GuardOutcome::Proceed(identity);
        }

        let _fetching = self.fetch_lock.lock().await;
        // Another navigation may have finished the fetch while this one waited.
        if let Some(identity) = self.store.identity() {
            return GuardOutcome::Proceed(identity);
        }
        if self.store.live_token(now_secs()).is_none() {
            self.store.clear_identity();
            return self.redirect(requested);
        }

        match self.fetcher.current_identity(&token).await {
            Ok(identity) => {
                self.store.set_identity(identity.clone());
                GuardOutcome::Proceed(identity)
            }
            Err(e) => {
                warn!(error = %e, "identity fetch failed; clearing session");
                self.store.clear();
                self.redirect(requested)
            }
        }
    }

    /// Forget the cached identity and the stored token.
    pub fn logout(&self) {
        self.store.clear();
    }

    fn redirect(&self, requested: &str) -> GuardOutcome {
        GuardOutcome::Redirect(sign_in_redirect(&self.sign_in_path, requested))
    }
}

/// Build `{sign_in_path}?redirect=<requested>`.
///
/// Only same-origin paths are carried over; anything else falls back to `/`.
pub fn sign_in_redirect(sign_in_path: &str, requested: &str) -> String {
    let target = if requested.starts_with('/') && !requested.starts_with("//") {
        requested
    } else {
        "/"
    };
    let query = form_urlencoded::Serializer::new(String::new())
        .append_pair("redirect", target)
        .finish();
    format!("{sign_in_path}?{query}")
}
