use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Plans::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Plans::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Plans::Code).string().not_null().unique_key())
                    .col(ColumnDef::new(Plans::Name).string().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Tenants::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Tenants::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Tenants::Name).string().not_null())
                    .col(
                        ColumnDef::new(Tenants::Status)
                            .string_len(16)
                            .not_null()
                            .default("TRIAL"),
                    )
                    .col(ColumnDef::new(Tenants::PlanId).uuid())
                    .col(ColumnDef::new(Tenants::PlanExpiresAt).timestamp_with_time_zone())
                    .col(
                        ColumnDef::new(Tenants::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .check(Expr::col(Tenants::Status).is_in([
                        "ACTIVE",
                        "TRIAL",
                        "SUSPENDED",
                        "EXPIRED",
                    ]))
                    .foreign_key(
                        ForeignKey::create()
                            .from(Tenants::Table, Tenants::PlanId)
                            .to(Plans::Table, Plans::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Tenants::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Plans::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Plans {
    Table,
    Id,
    Code,
    Name,
}

#[derive(Iden)]
enum Tenants {
    Table,
    Id,
    Name,
    Status,
    PlanId,
    PlanExpiresAt,
    CreatedAt,
}
