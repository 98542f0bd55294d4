use chrono::{DateTime, Utc};

use tillpoint_domain::id::TenantId;
use tillpoint_domain::tenant::{SubscriptionStatus, Tenant};

use crate::domain::repository::TenantRepository;
use crate::error::BackofficeError;

/// Decide whether a tenant's subscription admits a request at `now`.
///
/// Checked in order: suspended, expired status, then a plan expiry strictly
/// before `now`. Status and expiry are independent; either one denies.
pub fn check_subscription(tenant: &Tenant, now: DateTime<Utc>) -> Result<(), BackofficeError> {
    match tenant.status {
        SubscriptionStatus::Suspended => return Err(BackofficeError::SubscriptionSuspended),
        SubscriptionStatus::Expired => return Err(BackofficeError::SubscriptionExpired),
        SubscriptionStatus::Active | SubscriptionStatus::Trial => {}
    }
    if tenant.plan_expires_at.is_some_and(|exp| exp < now) {
        return Err(BackofficeError::SubscriptionExpired);
    }
    Ok(())
}

/// Loads the caller's tenant and applies [`check_subscription`].
pub struct TenantGateUseCase<T: TenantRepository> {
    pub tenants: T,
}

impl<T: TenantRepository> TenantGateUseCase<T> {
    pub async fn execute(
        &self,
        tenant_id: TenantId,
        now: DateTime<Utc>,
    ) -> Result<(), BackofficeError> {
        let tenant = self
            .tenants
            .find_by_id(tenant_id)
            .await?
            .ok_or(BackofficeError::TenantNotFound)?;

        check_subscription(&tenant, now).inspect_err(|e| {
            tracing::info!(
                tenant_id = %tenant.id,
                status = %tenant.status,
                kind = e.kind(),
                "tenant denied by entitlement gate"
            );
        })
    }
}
