use chrono::{DateTime, Utc};

use tillpoint_domain::entitlement::{EntitlementRecord, FeatureCode};
use tillpoint_domain::identity::IdentityContext;

use crate::domain::repository::EntitlementRepository;
use crate::domain::types::MANAGE_ENTITLEMENTS_PERMISSION;
use crate::error::BackofficeError;

// ── ListEntitlements ─────────────────────────────────────────────────────────

pub struct ListEntitlementsUseCase<E: EntitlementRepository> {
    pub entitlements: E,
}

impl<E: EntitlementRepository> ListEntitlementsUseCase<E> {
    /// Feature records of the caller's own tenant.
    pub async fn execute(
        &self,
        caller: &IdentityContext,
    ) -> Result<Vec<EntitlementRecord>, BackofficeError> {
        self.entitlements.list_by_tenant(caller.tenant_id).await
    }
}

// ── SetEntitlement ───────────────────────────────────────────────────────────

pub struct SetEntitlementInput {
    pub feature_code: String,
    pub enabled: bool,
    pub config: Option<serde_json::Value>,
}

pub struct SetEntitlementUseCase<E: EntitlementRepository> {
    pub entitlements: E,
}

impl<E: EntitlementRepository> SetEntitlementUseCase<E> {
    /// Idempotent write of one feature flag for the caller's tenant.
    ///
    /// Repeating the call for the same feature code updates the existing
    /// record in place.
    pub async fn execute(
        &self,
        caller: &IdentityContext,
        input: SetEntitlementInput,
        now: DateTime<Utc>,
    ) -> Result<EntitlementRecord, BackofficeError> {
        if !caller.has_permission(MANAGE_ENTITLEMENTS_PERMISSION) {
            return Err(BackofficeError::Forbidden);
        }

        let feature_code = input
            .feature_code
            .parse::<FeatureCode>()
            .map_err(|_| BackofficeError::InvalidFeatureCode)?;

        let record = EntitlementRecord {
            tenant_id: caller.tenant_id,
            feature_code,
            enabled: input.enabled,
            config: input.config,
            updated_at: now,
        };
        self.entitlements.upsert(&record).await?;

        tracing::info!(
            tenant_id = %record.tenant_id,
            feature_code = %record.feature_code,
            enabled = record.enabled,
            "entitlement updated"
        );
        Ok(record)
    }
}
