//! Identity records and the request-scoped identity context derived from them.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::id::{OutletId, RoleId, TenantId, UserId};
use crate::permission::project_permissions;
use crate::tenant::Tenant;

/// Links a role to one permission code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionAssignment {
    pub role_id: RoleId,
    pub permission_code: String,
}

/// Role with its permission assignments, as loaded from the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Role {
    pub id: RoleId,
    pub name: String,
    pub assignments: Vec<PermissionAssignment>,
}

/// Role snapshot carried inside an [`IdentityContext`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleSummary {
    pub id: RoleId,
    pub name: String,
}

/// Physical store location a user is attached to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outlet {
    pub id: OutletId,
    pub tenant_id: TenantId,
    pub name: String,
    pub address: Option<String>,
}

/// User account with its tenant, role and outlet graph.
///
/// Created by registration and mutated by profile/role operations elsewhere;
/// the authorization core only reads it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub id: UserId,
    pub username: String,
    pub email: String,
    pub is_active: bool,
    pub tenant: Tenant,
    pub role: Option<Role>,
    pub outlet: Option<Outlet>,
}

/// Request-scoped view of an authenticated user.
///
/// Rebuilt on every resolution and never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityContext {
    pub user_id: UserId,
    pub username: String,
    pub email: String,
    pub tenant_id: TenantId,
    pub tenant: Tenant,
    pub role_id: Option<RoleId>,
    pub role: Option<RoleSummary>,
    pub permissions: BTreeSet<String>,
    pub outlet_id: Option<OutletId>,
    pub outlet: Option<Outlet>,
}

impl IdentityContext {
    /// Build the context for an identity, flattening its role's permissions.
    ///
    /// Callers are responsible for rejecting inactive identities first.
    pub fn from_identity(identity: Identity) -> Self {
        let permissions = project_permissions(identity.role.as_ref());
        let role = identity.role.map(|r| RoleSummary {
            id: r.id,
            name: r.name,
        });
        Self {
            user_id: identity.id,
            username: identity.username,
            email: identity.email,
            tenant_id: identity.tenant.id,
            tenant: identity.tenant,
            role_id: role.as_ref().map(|r| r.id),
            role,
            permissions,
            outlet_id: identity.outlet.as_ref().map(|o| o.id),
            outlet: identity.outlet,
        }
    }

    pub fn has_permission(&self, code: &str) -> bool {
        self.permissions.contains(code)
    }
}
