use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::{get, post, put},
};

use tillpoint_core::health::healthz;
use tillpoint_core::middleware::{propagate_request_id_layer, request_id_layer, trace_layer};

use crate::handlers::{
    entitlement::{list_entitlements, set_entitlement},
    health::readyz,
    me::get_me,
    token::refresh_token,
};
use crate::middleware::{credential::resolve_identity, gate::entitlement_gate};
use crate::state::AppState;

/// Build the service router.
///
/// Layer order, outermost first: request id, trace, request id propagation,
/// credential resolution, entitlement gate.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/health", get(healthz))
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Token
        .route("/auth/token/refresh", post(refresh_token))
        // Identity
        .route("/auth/me", get(get_me))
        // Entitlements
        .route("/tenants/@me/entitlements", get(list_entitlements))
        .route(
            "/tenants/@me/entitlements/{feature_code}",
            put(set_entitlement),
        )
        .layer(from_fn_with_state(state.clone(), entitlement_gate))
        .layer(from_fn_with_state(state.clone(), resolve_identity))
        .layer(propagate_request_id_layer())
        .layer(trace_layer())
        .layer(request_id_layer())
        .with_state(state)
}
