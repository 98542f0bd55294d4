use sea_orm_migration::prelude::*;

#[tokio::main]
async fn main() {
    cli::run_cli(tillpoint_backoffice_migration::Migrator).await;
}
