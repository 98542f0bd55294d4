use axum::Json;
use axum::http::StatusCode;
use serde::Serialize;

/// Body returned by the health endpoints.
#[derive(Debug, Serialize)]
pub struct Health {
    pub status: &'static str,
}

/// Liveness handler for `GET /healthz` and `GET /health`.
pub async fn healthz() -> (StatusCode, Json<Health>) {
    (StatusCode::OK, Json(Health { status: "ok" }))
}

/// Map a readiness check result (e.g. a database ping) to a response.
///
/// Failures are logged and reported as 503 without exposing the cause.
pub fn readiness<E: std::fmt::Display>(check: Result<(), E>) -> (StatusCode, Json<Health>) {
    match check {
        Ok(()) => (StatusCode::OK, Json(Health { status: "ready" })),
        Err(e) => {
            tracing::warn!(error = %e, "readiness check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(Health {
                    status: "unavailable",
                }),
            )
        }
    }
}
