use tracing::debug;

use tillpoint_auth_types::token::validate_access_token;
use tillpoint_domain::identity::IdentityContext;

use crate::domain::repository::IdentityRepository;
use crate::error::BackofficeError;

/// Turns a bearer access token into an [`IdentityContext`].
pub struct ResolveIdentityUseCase<I: IdentityRepository> {
    pub identities: I,
    pub jwt_secret: String,
}

impl<I: IdentityRepository> ResolveIdentityUseCase<I> {
    /// Fails closed: any token problem, an unknown subject or an inactive
    /// identity yields [`BackofficeError::Unauthenticated`]. Store failures
    /// surface as [`BackofficeError::Internal`].
    pub async fn execute(&self, bearer: Option<&str>) -> Result<IdentityContext, BackofficeError> {
        let token = bearer.ok_or(BackofficeError::Unauthenticated)?;

        let info = validate_access_token(token, &self.jwt_secret).map_err(|e| {
            debug!(reason = %e, "access token rejected");
            BackofficeError::Unauthenticated
        })?;

        let identity = self
            .identities
            .find_by_id(info.user_id)
            .await?
            .ok_or_else(|| {
                debug!(user_id = %info.user_id, "token subject not found");
                BackofficeError::Unauthenticated
            })?;

        if !identity.is_active {
            debug!(user_id = %identity.id, "inactive identity rejected");
            return Err(BackofficeError::Unauthenticated);
        }

        Ok(IdentityContext::from_identity(identity))
    }
}
