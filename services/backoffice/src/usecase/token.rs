use tracing::debug;

use tillpoint_auth_types::token::{TokenKind, issue_token, validate_refresh_token};
use tillpoint_domain::id::UserId;

use crate::domain::repository::IdentityRepository;
use crate::domain::types::TokenPair;
use crate::error::BackofficeError;

/// Token lifetimes used when signing a new pair.
#[derive(Debug, Clone, Copy)]
pub struct TokenTtl {
    pub access_secs: u64,
    pub refresh_secs: u64,
}

pub fn issue_token_pair(
    user_id: UserId,
    ttl: TokenTtl,
    secret: &str,
) -> Result<TokenPair, BackofficeError> {
    let (access_token, access_token_exp) =
        issue_token(user_id, TokenKind::Access, ttl.access_secs, secret)
            .map_err(|e| BackofficeError::Internal(e.into()))?;
    let (refresh_token, refresh_token_exp) =
        issue_token(user_id, TokenKind::Refresh, ttl.refresh_secs, secret)
            .map_err(|e| BackofficeError::Internal(e.into()))?;
    Ok(TokenPair {
        access_token,
        access_token_exp,
        refresh_token,
        refresh_token_exp,
    })
}

// ── RefreshToken ─────────────────────────────────────────────────────────────

pub struct RefreshTokenUseCase<I: IdentityRepository> {
    pub identities: I,
    pub jwt_secret: String,
    pub ttl: TokenTtl,
}

impl<I: IdentityRepository> RefreshTokenUseCase<I> {
    /// Exchange a refresh token for a new pair. The identity must still exist
    /// and be active; otherwise the exchange is refused.
    pub async fn execute(&self, refresh_token: &str) -> Result<TokenPair, BackofficeError> {
        let info = validate_refresh_token(refresh_token, &self.jwt_secret).map_err(|e| {
            debug!(reason = %e, "refresh token rejected");
            BackofficeError::Unauthenticated
        })?;

        let identity = self
            .identities
            .find_by_id(info.user_id)
            .await?
            .ok_or(BackofficeError::Unauthenticated)?;

        if !identity.is_active {
            debug!(user_id = %identity.id, "refresh refused for inactive identity");
            return Err(BackofficeError::Unauthenticated);
        }

        issue_token_pair(identity.id, self.ttl, &self.jwt_secret)
    }
}
