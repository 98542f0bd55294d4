use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use tracing::debug;

use tillpoint_auth_types::bearer::bearer_token;

use crate::error::BackofficeError;
use crate::middleware::public_path::is_public_path;
use crate::state::AppState;
use crate::usecase::identity::ResolveIdentityUseCase;

/// Attach an [`IdentityContext`](tillpoint_domain::identity::IdentityContext)
/// to the request extensions when a valid bearer token is presented.
///
/// | Request | Result |
/// |---------|--------|
/// | no `Authorization` header | continues without context |
/// | valid token, active identity | continues with context |
/// | token not resolved, public path | continues without context |
/// | bad token / inactive identity, other path | 401 |
pub async fn resolve_identity(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, BackofficeError> {
    let public = is_public_path(req.uri().path());

    let token = match bearer_token(req.headers()) {
        Ok(token) => token,
        Err(_) if public => None,
        Err(e) => {
            debug!(reason = %e, "unusable authorization header");
            return Err(BackofficeError::Unauthenticated);
        }
    };
    let Some(token) = token else {
        return Ok(next.run(req).await);
    };

    let usecase = ResolveIdentityUseCase {
        identities: state.identity_repo(),
        jwt_secret: state.jwt_secret.clone(),
    };
    match usecase.execute(Some(&token)).await {
        Ok(context) => {
            req.extensions_mut().insert(context);
        }
        Err(e) if public => {
            debug!(error = %e, "identity not resolved on public path");
        }
        Err(e) => return Err(e),
    }

    Ok(next.run(req).await)
}
