//! sea-orm entities for the tables read and written by the back-office service.

pub mod outlets;
pub mod permissions;
pub mod plans;
pub mod role_permissions;
pub mod roles;
pub mod tenant_features;
pub mod tenants;
pub mod users;
