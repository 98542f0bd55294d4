use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use tillpoint_auth_types::identity::CurrentIdentity;
use tillpoint_domain::entitlement::EntitlementRecord;

use crate::error::BackofficeError;
use crate::state::AppState;
use crate::usecase::entitlement::{
    ListEntitlementsUseCase, SetEntitlementInput, SetEntitlementUseCase,
};

#[derive(Serialize)]
pub struct EntitlementResponse {
    pub feature_code: String,
    pub enabled: bool,
    pub config: Option<serde_json::Value>,
    #[serde(serialize_with = "tillpoint_core::serde::to_rfc3339_ms")]
    pub updated_at: DateTime<Utc>,
}

impl From<EntitlementRecord> for EntitlementResponse {
    fn from(record: EntitlementRecord) -> Self {
        Self {
            feature_code: record.feature_code.to_string(),
            enabled: record.enabled,
            config: record.config,
            updated_at: record.updated_at,
        }
    }
}

// ── GET /tenants/@me/entitlements ────────────────────────────────────────────

pub async fn list_entitlements(
    State(state): State<AppState>,
    CurrentIdentity(caller): CurrentIdentity,
) -> Result<impl IntoResponse, BackofficeError> {
    let usecase = ListEntitlementsUseCase {
        entitlements: state.entitlement_repo(),
    };
    let records = usecase.execute(&caller).await?;
    Ok(Json(
        records
            .into_iter()
            .map(EntitlementResponse::from)
            .collect::<Vec<_>>(),
    ))
}

// ── PUT /tenants/@me/entitlements/{feature_code} ─────────────────────────────

#[derive(Deserialize)]
pub struct SetEntitlementRequest {
    pub enabled: bool,
    #[serde(default)]
    pub config: Option<serde_json::Value>,
}

pub async fn set_entitlement(
    State(state): State<AppState>,
    CurrentIdentity(caller): CurrentIdentity,
    Path(feature_code): Path<String>,
    Json(body): Json<SetEntitlementRequest>,
) -> Result<impl IntoResponse, BackofficeError> {
    let usecase = SetEntitlementUseCase {
        entitlements: state.entitlement_repo(),
    };
    let record = usecase
        .execute(
            &caller,
            SetEntitlementInput {
                feature_code,
                enabled: body.enabled,
                config: body.config,
            },
            Utc::now(),
        )
        .await?;
    Ok(Json(EntitlementResponse::from(record)))
}
