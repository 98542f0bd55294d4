//! Signed bearer tokens for integration tests.
//!
//! Requests pass through the real credential resolver, so tests need tokens
//! signed with the same secret the service under test was built with.

use http::header::AUTHORIZATION;
use http::{HeaderMap, HeaderValue};
use uuid::Uuid;

use tillpoint_auth_types::token::{TokenKind, issue_token};
use tillpoint_domain::id::UserId;

/// Secret shared between `MockAuth` and the service state in tests.
pub const TEST_JWT_SECRET: &str = "tillpoint-test-secret";

/// Identity whose tokens are minted for test requests.
pub struct MockAuth {
    pub user_id: UserId,
    pub secret: String,
}

impl MockAuth {
    pub fn new(user_id: UserId) -> Self {
        Self {
            user_id,
            secret: TEST_JWT_SECRET.to_owned(),
        }
    }

    pub fn random() -> Self {
        Self::new(UserId(Uuid::new_v4()))
    }

    /// Use a different signing secret (e.g. to exercise signature failures).
    pub fn with_secret(mut self, secret: &str) -> Self {
        self.secret = secret.to_owned();
        self
    }

    /// Access token valid for one hour.
    pub fn access_token(&self) -> String {
        self.token(TokenKind::Access)
    }

    /// Refresh token valid for one hour.
    pub fn refresh_token(&self) -> String {
        self.token(TokenKind::Refresh)
    }

    /// `Authorization: Bearer <access token>` header map.
    pub fn headers(&self) -> HeaderMap {
        let mut map = HeaderMap::new();
        map.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", self.access_token())).unwrap(),
        );
        map
    }

    fn token(&self, kind: TokenKind) -> String {
        issue_token(self.user_id, kind, 3600, &self.secret)
            .expect("failed to sign test token")
            .0
    }
}
