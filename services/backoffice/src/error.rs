use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Back-office service error variants.
///
/// Every credential failure (missing, malformed or expired token, unknown or
/// inactive identity) collapses into `Unauthenticated` with no detail.
#[derive(Debug, thiserror::Error)]
pub enum BackofficeError {
    #[error("unauthenticated")]
    Unauthenticated,
    #[error("tenant not found")]
    TenantNotFound,
    #[error("subscription suspended: update your payment method to restore access")]
    SubscriptionSuspended,
    #[error("subscription expired: renew to continue")]
    SubscriptionExpired,
    #[error("forbidden")]
    Forbidden,
    #[error("invalid feature code")]
    InvalidFeatureCode,
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl BackofficeError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Unauthenticated => "UNAUTHENTICATED",
            Self::TenantNotFound => "TENANT_NOT_FOUND",
            Self::SubscriptionSuspended => "SUBSCRIPTION_SUSPENDED",
            Self::SubscriptionExpired => "SUBSCRIPTION_EXPIRED",
            Self::Forbidden => "FORBIDDEN",
            Self::InvalidFeatureCode => "INVALID_FEATURE_CODE",
            Self::Internal(_) => "INTERNAL",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::Unauthenticated => StatusCode::UNAUTHORIZED,
            Self::TenantNotFound | Self::SubscriptionSuspended | Self::Forbidden => {
                StatusCode::FORBIDDEN
            }
            Self::SubscriptionExpired => StatusCode::PAYMENT_REQUIRED,
            Self::InvalidFeatureCode => StatusCode::BAD_REQUEST,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for BackofficeError {
    fn into_response(self) -> Response {
        // TraceLayer already records every response status; only 500s need the cause chain.
        if let Self::Internal(ref e) = self {
            tracing::error!(error = ?e, kind = "INTERNAL", "internal error");
        }
        let body = serde_json::json!({
            "kind": self.kind(),
            "message": self.to_string(),
        });
        (self.status(), axum::Json(body)).into_response()
    }
}
