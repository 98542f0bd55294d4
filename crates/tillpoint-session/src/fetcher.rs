#![allow(async_fn_in_trait)]

use reqwest::Client;
use url::Url;

use tillpoint_domain::identity::IdentityContext;

use crate::config::SessionConfig;
use crate::error::SessionError;

/// Source of the caller's current identity context.
pub trait IdentityFetcher: Send + Sync {
    async fn current_identity(&self, access_token: &str) -> Result<IdentityContext, SessionError>;
}

/// Fetches `GET {api_base_url}/auth/me` with the access token as bearer.
pub struct HttpIdentityFetcher {
    client: Client,
    me_url: Url,
}

impl HttpIdentityFetcher {
    /// `api_base_url` is joined with `auth/me`; give it a trailing slash when it has a path prefix.
    pub fn new(config: &SessionConfig) -> Result<Self, SessionError> {
        Ok(Self {
            client: Client::new(),
            me_url: config.api_base_url.join("auth/me")?,
        })
    }
}

impl IdentityFetcher for HttpIdentityFetcher {
    async fn current_identity(&self, access_token: &str) -> Result<IdentityContext, SessionError> {
        let resp = self
            .client
            .get(self.me_url.clone())
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(SessionError::Transport)?;

        let status = resp.status();
        if !status.is_success() {
            return Err(SessionError::Status(status.as_u16()));
        }

        resp.json::<IdentityContext>()
            .await
            .map_err(SessionError::Decode)
    }
}
