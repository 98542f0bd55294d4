use std::sync::Arc;

use anyhow::Context as _;
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ActiveValue::Set, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder,
};
use uuid::Uuid;

use tillpoint_backoffice_schema::{
    outlets, permissions, plans, role_permissions, roles, tenant_features, tenants, users,
};
use tillpoint_domain::entitlement::{EntitlementRecord, FeatureCode};
use tillpoint_domain::id::{OutletId, PlanId, RoleId, TenantId, UserId};
use tillpoint_domain::identity::{Identity, Outlet, PermissionAssignment, Role};
use tillpoint_domain::tenant::{Plan, SubscriptionStatus, Tenant};

use crate::domain::repository::{EntitlementRepository, IdentityRepository, TenantRepository};
use crate::error::BackofficeError;

// ── Identity repository ──────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbIdentityRepository {
    pub db: Arc<DatabaseConnection>,
}

impl IdentityRepository for DbIdentityRepository {
    async fn find_by_id(&self, id: UserId) -> Result<Option<Identity>, BackofficeError> {
        let Some(user) = users::Entity::find_by_id(id.0)
            .one(&*self.db)
            .await
            .context("find user by id")?
        else {
            return Ok(None);
        };

        let Some(tenant) = load_tenant(&*self.db, user.tenant_id).await? else {
            // Dangling tenant reference: treat as unknown identity.
            tracing::warn!(
                user_id = %id,
                tenant_id = %user.tenant_id,
                "user references missing tenant"
            );
            return Ok(None);
        };

        let role = match user.role_id {
            Some(role_id) => load_role(&*self.db, role_id).await?,
            None => None,
        };

        let outlet = match user.outlet_id {
            Some(outlet_id) => outlets::Entity::find_by_id(outlet_id)
                .one(&*self.db)
                .await
                .context("find outlet by id")?
                .map(outlet_from_model),
            None => None,
        };

        Ok(Some(Identity {
            id: UserId(user.id),
            username: user.username,
            email: user.email,
            is_active: user.is_active,
            tenant,
            role,
            outlet,
        }))
    }
}

async fn load_tenant<C: ConnectionTrait>(
    db: &C,
    tenant_id: Uuid,
) -> Result<Option<Tenant>, BackofficeError> {
    let Some(model) = tenants::Entity::find_by_id(tenant_id)
        .one(db)
        .await
        .context("find tenant by id")?
    else {
        return Ok(None);
    };

    let plan = match model.plan_id {
        Some(plan_id) => plans::Entity::find_by_id(plan_id)
            .one(db)
            .await
            .context("find plan by id")?
            .map(plan_from_model),
        None => None,
    };

    let status = model
        .status
        .parse::<SubscriptionStatus>()
        .context("parse tenant status")?;

    Ok(Some(Tenant {
        id: TenantId(model.id),
        name: model.name,
        status,
        plan,
        plan_expires_at: model.plan_expires_at,
    }))
}

async fn load_role<C: ConnectionTrait>(
    db: &C,
    role_id: Uuid,
) -> Result<Option<Role>, BackofficeError> {
    let Some(role) = roles::Entity::find_by_id(role_id)
        .one(db)
        .await
        .context("find role by id")?
    else {
        return Ok(None);
    };

    let assignments = permissions::Entity::find()
        .inner_join(role_permissions::Entity)
        .filter(role_permissions::Column::RoleId.eq(role_id))
        .all(db)
        .await
        .context("load role permissions")?
        .into_iter()
        .map(|p| PermissionAssignment {
            role_id: RoleId(role_id),
            permission_code: p.code,
        })
        .collect();

    Ok(Some(Role {
        id: RoleId(role.id),
        name: role.name,
        assignments,
    }))
}

fn plan_from_model(model: plans::Model) -> Plan {
    Plan {
        id: PlanId(model.id),
        code: model.code,
        name: model.name,
    }
}

fn outlet_from_model(model: outlets::Model) -> Outlet {
    Outlet {
        id: OutletId(model.id),
        tenant_id: TenantId(model.tenant_id),
        name: model.name,
        address: model.address,
    }
}

// ── Tenant repository ────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbTenantRepository {
    pub db: Arc<DatabaseConnection>,
}

impl TenantRepository for DbTenantRepository {
    async fn find_by_id(&self, id: TenantId) -> Result<Option<Tenant>, BackofficeError> {
        load_tenant(&*self.db, id.0).await
    }
}

// ── Entitlement repository ───────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbEntitlementRepository {
    pub db: Arc<DatabaseConnection>,
}

impl EntitlementRepository for DbEntitlementRepository {
    async fn list_by_tenant(
        &self,
        tenant_id: TenantId,
    ) -> Result<Vec<EntitlementRecord>, BackofficeError> {
        let models = tenant_features::Entity::find()
            .filter(tenant_features::Column::TenantId.eq(tenant_id.0))
            .order_by_asc(tenant_features::Column::FeatureCode)
            .all(&*self.db)
            .await
            .context("list tenant features")?;
        models
            .into_iter()
            .map(entitlement_from_model)
            .collect::<Result<_, _>>()
    }

    async fn upsert(&self, record: &EntitlementRecord) -> Result<(), BackofficeError> {
        let model = tenant_features::ActiveModel {
            id: Set(Uuid::now_v7()),
            tenant_id: Set(record.tenant_id.0),
            feature_code: Set(record.feature_code.as_str().to_owned()),
            enabled: Set(record.enabled),
            config: Set(record.config.clone()),
            updated_at: Set(record.updated_at),
        };
        // Relies on uq_tenant_features_tenant_id_feature_code.
        tenant_features::Entity::insert(model)
            .on_conflict(
                OnConflict::columns([
                    tenant_features::Column::TenantId,
                    tenant_features::Column::FeatureCode,
                ])
                .update_columns([
                    tenant_features::Column::Enabled,
                    tenant_features::Column::Config,
                    tenant_features::Column::UpdatedAt,
                ])
                .to_owned(),
            )
            .exec_without_returning(&*self.db)
            .await
            .context("upsert tenant feature")?;
        Ok(())
    }
}

fn entitlement_from_model(
    model: tenant_features::Model,
) -> Result<EntitlementRecord, BackofficeError> {
    let feature_code = model
        .feature_code
        .parse::<FeatureCode>()
        .context("parse stored feature code")?;
    Ok(EntitlementRecord {
        tenant_id: TenantId(model.tenant_id),
        feature_code,
        enabled: model.enabled,
        config: model.config,
        updated_at: model.updated_at,
    })
}
