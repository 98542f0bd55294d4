use url::Url;

use crate::error::SessionError;

/// Sign-in view used when none is configured.
pub const DEFAULT_SIGN_IN_PATH: &str = "/sign-in";

/// Client session configuration.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Base URL of the back-office API (e.g. `https://api.example.com/`).
    pub api_base_url: Url,
    /// Client-side path of the sign-in view.
    pub sign_in_path: String,
}

impl SessionConfig {
    pub fn new(api_base_url: &str) -> Result<Self, SessionError> {
        Ok(Self {
            api_base_url: Url::parse(api_base_url)?,
            sign_in_path: DEFAULT_SIGN_IN_PATH.to_owned(),
        })
    }

    pub fn with_sign_in_path(mut self, path: impl Into<String>) -> Self {
        self.sign_in_path = path.into();
        self
    }
}
