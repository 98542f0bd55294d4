use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::config::BackofficeConfig;
use crate::infra::db::{DbEntitlementRepository, DbIdentityRepository, DbTenantRepository};
use crate::usecase::token::TokenTtl;

/// Shared application state passed to every handler and middleware via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<DatabaseConnection>,
    pub jwt_secret: String,
    pub token_ttl: TokenTtl,
}

impl AppState {
    pub fn new(db: DatabaseConnection, config: &BackofficeConfig) -> Self {
        Self {
            db: Arc::new(db),
            jwt_secret: config.jwt_secret.clone(),
            token_ttl: TokenTtl {
                access_secs: config.access_token_ttl_secs,
                refresh_secs: config.refresh_token_ttl_secs,
            },
        }
    }

    pub fn identity_repo(&self) -> DbIdentityRepository {
        DbIdentityRepository {
            db: Arc::clone(&self.db),
        }
    }

    pub fn tenant_repo(&self) -> DbTenantRepository {
        DbTenantRepository {
            db: Arc::clone(&self.db),
        }
    }

    pub fn entitlement_repo(&self) -> DbEntitlementRepository {
        DbEntitlementRepository {
            db: Arc::clone(&self.db),
        }
    }
}
