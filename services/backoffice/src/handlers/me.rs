use axum::Json;

use tillpoint_auth_types::identity::CurrentIdentity;
use tillpoint_domain::identity::IdentityContext;

/// `GET /auth/me`: the caller's identity context.
pub async fn get_me(CurrentIdentity(context): CurrentIdentity) -> Json<IdentityContext> {
    Json(context)
}
