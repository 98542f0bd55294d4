//! Permission projection.

use std::collections::BTreeSet;

use crate::identity::Role;

/// Flatten a role's permission assignments into a set of permission codes.
///
/// No role yields an empty set, which is a valid authenticated-but-capability-less state.
/// Duplicate codes across assignments collapse to one entry.
pub fn project_permissions(role: Option<&Role>) -> BTreeSet<String> {
    role.map(|r| {
        r.assignments
            .iter()
            .map(|a| a.permission_code.clone())
            .collect()
    })
    .unwrap_or_default()
}
