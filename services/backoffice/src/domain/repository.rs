#![allow(async_fn_in_trait)]

use tillpoint_domain::entitlement::EntitlementRecord;
use tillpoint_domain::id::{TenantId, UserId};
use tillpoint_domain::identity::Identity;
use tillpoint_domain::tenant::Tenant;

use crate::error::BackofficeError;

/// Read access to identities and their related tenant, role and outlet.
pub trait IdentityRepository: Send + Sync {
    /// Load an identity with its tenant (and plan), role with permission
    /// assignments, and outlet. `None` when no such identity exists.
    async fn find_by_id(&self, id: UserId) -> Result<Option<Identity>, BackofficeError>;
}

/// Read access to tenants. Every call is a fresh read.
pub trait TenantRepository: Send + Sync {
    async fn find_by_id(&self, id: TenantId) -> Result<Option<Tenant>, BackofficeError>;
}

/// Per-tenant feature entitlements.
pub trait EntitlementRepository: Send + Sync {
    async fn list_by_tenant(
        &self,
        tenant_id: TenantId,
    ) -> Result<Vec<EntitlementRecord>, BackofficeError>;

    /// Insert the record, or overwrite `enabled`, `config` and `updated_at`
    /// of the existing record with the same `(tenant_id, feature_code)`.
    async fn upsert(&self, record: &EntitlementRecord) -> Result<(), BackofficeError>;
}
