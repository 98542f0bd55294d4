use sea_orm_migration::prelude::*;

mod m20260301_000001_create_plans_and_tenants;
mod m20260301_000002_create_roles_and_permissions;
mod m20260301_000003_create_outlets_and_users;
mod m20260301_000004_create_tenant_features;
mod m20260301_000005_unique_tenant_features;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260301_000001_create_plans_and_tenants::Migration),
            Box::new(m20260301_000002_create_roles_and_permissions::Migration),
            Box::new(m20260301_000003_create_outlets_and_users::Migration),
            Box::new(m20260301_000004_create_tenant_features::Migration),
            Box::new(m20260301_000005_unique_tenant_features::Migration),
        ]
    }
}
