use std::process::ExitCode;

use sea_orm::Database;
use tracing::{error, info};

use tillpoint_backoffice::config::BackofficeConfig;
use tillpoint_backoffice::router::build_router;
use tillpoint_backoffice::state::AppState;
use tillpoint_core::tracing::init_tracing;

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();

    let config = match BackofficeConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "invalid configuration");
            return ExitCode::FAILURE;
        }
    };

    match run(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = ?e, "backoffice service stopped");
            ExitCode::FAILURE
        }
    }
}

async fn run(config: BackofficeConfig) -> anyhow::Result<()> {
    use anyhow::Context as _;

    let db = Database::connect(&config.database_url)
        .await
        .context("failed to connect to database")?;

    let state = AppState::new(db, &config);
    let router = build_router(state);

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    info!("backoffice service listening on {addr}");
    axum::serve(listener, router).await.context("server error")?;
    Ok(())
}
