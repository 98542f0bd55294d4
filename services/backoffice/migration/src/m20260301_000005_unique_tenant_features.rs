use sea_orm_migration::prelude::*;

/// Collapse duplicate `(tenant_id, feature_code)` rows and add the unique index
/// that the upsert write path conflicts on.
#[derive(DeriveMigrationName)]
pub struct Migration;

pub const UNIQUE_INDEX: &str = "uq_tenant_features_tenant_id_feature_code";

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Keep the most recently updated row of each pair; ties broken by id.
        manager
            .get_connection()
            .execute_unprepared(
                r#"
                DELETE FROM tenant_features t
                USING (
                    SELECT id,
                           ROW_NUMBER() OVER (
                               PARTITION BY tenant_id, feature_code
                               ORDER BY updated_at DESC, id DESC
                           ) AS rn
                    FROM tenant_features
                ) ranked
                WHERE t.id = ranked.id AND ranked.rn > 1
                "#,
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .table(TenantFeatures::Table)
                    .col(TenantFeatures::TenantId)
                    .col(TenantFeatures::FeatureCode)
                    .name(UNIQUE_INDEX)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name(UNIQUE_INDEX).to_owned())
            .await
    }
}

#[derive(Iden)]
enum TenantFeatures {
    Table,
    TenantId,
    FeatureCode,
}
