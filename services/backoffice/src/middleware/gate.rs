use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use chrono::Utc;

use tillpoint_domain::identity::IdentityContext;

use crate::error::BackofficeError;
use crate::middleware::public_path::is_public_path;
use crate::state::AppState;
use crate::usecase::gate::TenantGateUseCase;

/// Deny requests whose tenant subscription is suspended or expired.
///
/// Runs after [`resolve_identity`](super::credential::resolve_identity). Public
/// paths and requests without an identity context pass through untouched.
pub async fn entitlement_gate(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, BackofficeError> {
    if is_public_path(req.uri().path()) {
        return Ok(next.run(req).await);
    }
    let Some(tenant_id) = req
        .extensions()
        .get::<IdentityContext>()
        .map(|context| context.tenant_id)
    else {
        return Ok(next.run(req).await);
    };

    let usecase = TenantGateUseCase {
        tenants: state.tenant_repo(),
    };
    usecase.execute(tenant_id, Utc::now()).await?;

    Ok(next.run(req).await)
}
