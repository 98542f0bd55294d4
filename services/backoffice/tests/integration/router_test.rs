use std::sync::Arc;

use axum::http::StatusCode;
use axum_test::TestServer;
use chrono::{TimeZone, Utc};
use sea_orm::{DatabaseBackend, DatabaseConnection, DbErr, MockDatabase, MockExecResult};
use serde_json::{Value, json};
use uuid::Uuid;

use tillpoint_backoffice::domain::types::{
    MANAGE_ENTITLEMENTS_PERMISSION, X_TILLPOINT_ACCESS_TOKEN_EXPIRES,
};
use tillpoint_backoffice::router::build_router;
use tillpoint_backoffice::state::AppState;
use tillpoint_backoffice::usecase::token::TokenTtl;
use tillpoint_backoffice_schema::{permissions, roles, tenants, users};
use tillpoint_testing::auth::{MockAuth, TEST_JWT_SECRET};

fn server(db: DatabaseConnection) -> TestServer {
    let state = AppState {
        db: Arc::new(db),
        jwt_secret: TEST_JWT_SECRET.to_owned(),
        token_ttl: TokenTtl {
            access_secs: 900,
            refresh_secs: 86_400,
        },
    };
    TestServer::new(build_router(state)).unwrap()
}

fn empty_db() -> DatabaseConnection {
    MockDatabase::new(DatabaseBackend::Postgres).into_connection()
}

fn user_row(auth: &MockAuth, tenant_id: Uuid, role_id: Option<Uuid>, active: bool) -> users::Model {
    let now = Utc::now();
    users::Model {
        id: auth.user_id.0,
        username: "u1".into(),
        email: "u1@example.com".into(),
        is_active: active,
        tenant_id,
        role_id,
        outlet_id: None,
        created_at: now,
        updated_at: now,
    }
}

fn tenant_row(id: Uuid, status: &str) -> tenants::Model {
    tenants::Model {
        id,
        name: "t1".into(),
        status: status.into(),
        plan_id: None,
        plan_expires_at: None,
        created_at: Utc::now(),
    }
}

// ── Public paths ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_serve_health_without_token() {
    let response = server(empty_db()).get("/health").await;

    response.assert_status(StatusCode::OK);
    assert!(response.headers().contains_key("x-request-id"));
}

#[tokio::test]
async fn should_serve_health_with_invalid_token() {
    let response = server(empty_db())
        .get("/healthz")
        .authorization_bearer("not-a-jwt")
        .await;

    response.assert_status(StatusCode::OK);
}

#[tokio::test]
async fn should_serve_health_with_valid_token_when_store_is_down() {
    let auth = MockAuth::random();
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_errors([DbErr::Custom("connection refused".into())])
        .into_connection();

    let response = server(db)
        .get("/healthz")
        .authorization_bearer(auth.access_token())
        .await;

    response.assert_status(StatusCode::OK);
}

#[tokio::test]
async fn should_serve_health_for_suspended_tenant() {
    let auth = MockAuth::random();
    let tenant_id = Uuid::new_v4();
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![user_row(&auth, tenant_id, None, true)]])
        .append_query_results([vec![tenant_row(tenant_id, "SUSPENDED")]])
        .into_connection();

    let response = server(db)
        .get("/health")
        .authorization_bearer(auth.access_token())
        .await;

    response.assert_status(StatusCode::OK);
}

// ── Credential resolution ────────────────────────────────────────────────────

#[tokio::test]
async fn should_reject_me_without_token() {
    let response = server(empty_db()).get("/auth/me").await;

    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn should_reject_me_with_invalid_token() {
    let response = server(empty_db())
        .get("/auth/me")
        .authorization_bearer("not-a-jwt")
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
    let body: Value = response.json();
    assert_eq!(body["kind"], "UNAUTHENTICATED");
}

#[tokio::test]
async fn should_reject_me_for_inactive_user() {
    let auth = MockAuth::random();
    let tenant_id = Uuid::new_v4();
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![user_row(&auth, tenant_id, None, false)]])
        .append_query_results([vec![tenant_row(tenant_id, "ACTIVE")]])
        .into_connection();

    let response = server(db)
        .get("/auth/me")
        .authorization_bearer(auth.access_token())
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn should_return_identity_context_for_active_user() {
    let auth = MockAuth::random();
    let tenant_id = Uuid::new_v4();
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![user_row(&auth, tenant_id, None, true)]])
        .append_query_results([vec![tenant_row(tenant_id, "ACTIVE")]])
        .append_query_results([vec![tenant_row(tenant_id, "ACTIVE")]])
        .into_connection();

    let response = server(db)
        .get("/auth/me")
        .authorization_bearer(auth.access_token())
        .await;

    response.assert_status(StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["user_id"], auth.user_id.to_string());
    assert_eq!(body["tenant_id"], tenant_id.to_string());
    assert_eq!(body["tenant"]["status"], "ACTIVE");
    assert_eq!(body["permissions"], json!([]));
}

// ── Entitlement gate ─────────────────────────────────────────────────────────

#[tokio::test]
async fn should_deny_suspended_tenant() {
    let auth = MockAuth::random();
    let tenant_id = Uuid::new_v4();
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![user_row(&auth, tenant_id, None, true)]])
        .append_query_results([vec![tenant_row(tenant_id, "SUSPENDED")]])
        .append_query_results([vec![tenant_row(tenant_id, "SUSPENDED")]])
        .into_connection();

    let response = server(db)
        .get("/auth/me")
        .authorization_bearer(auth.access_token())
        .await;

    response.assert_status(StatusCode::FORBIDDEN);
    let body: Value = response.json();
    assert_eq!(body["kind"], "SUBSCRIPTION_SUSPENDED");
}

#[tokio::test]
async fn should_deny_active_tenant_with_lapsed_plan() {
    let auth = MockAuth::random();
    let tenant_id = Uuid::new_v4();
    let mut lapsed = tenant_row(tenant_id, "ACTIVE");
    lapsed.plan_expires_at = Some(Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap());
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![user_row(&auth, tenant_id, None, true)]])
        .append_query_results([vec![lapsed.clone()]])
        .append_query_results([vec![lapsed]])
        .into_connection();

    let response = server(db)
        .get("/tenants/@me/entitlements")
        .authorization_bearer(auth.access_token())
        .await;

    response.assert_status(StatusCode::PAYMENT_REQUIRED);
    let body: Value = response.json();
    assert_eq!(body["kind"], "SUBSCRIPTION_EXPIRED");
}

// ── Entitlements ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_upsert_entitlement_for_manager() {
    let auth = MockAuth::random();
    let tenant_id = Uuid::new_v4();
    let role_id = Uuid::new_v4();
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![user_row(&auth, tenant_id, Some(role_id), true)]])
        .append_query_results([vec![tenant_row(tenant_id, "ACTIVE")]])
        .append_query_results([vec![roles::Model {
            id: role_id,
            tenant_id,
            name: "Owner".into(),
        }]])
        .append_query_results([vec![permissions::Model {
            id: Uuid::new_v4(),
            code: MANAGE_ENTITLEMENTS_PERMISSION.into(),
            description: None,
        }]])
        .append_query_results([vec![tenant_row(tenant_id, "ACTIVE")]])
        .append_exec_results([MockExecResult {
            last_insert_id: 0,
            rows_affected: 1,
        }])
        .into_connection();

    let response = server(db)
        .put("/tenants/@me/entitlements/multi-outlet")
        .authorization_bearer(auth.access_token())
        .json(&json!({ "enabled": true, "config": { "max_outlets": 3 } }))
        .await;

    response.assert_status(StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["feature_code"], "multi-outlet");
    assert_eq!(body["enabled"], true);
    assert_eq!(body["config"]["max_outlets"], 3);
}

#[tokio::test]
async fn should_forbid_entitlement_write_without_permission() {
    let auth = MockAuth::random();
    let tenant_id = Uuid::new_v4();
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![user_row(&auth, tenant_id, None, true)]])
        .append_query_results([vec![tenant_row(tenant_id, "ACTIVE")]])
        .append_query_results([vec![tenant_row(tenant_id, "ACTIVE")]])
        .into_connection();

    let response = server(db)
        .put("/tenants/@me/entitlements/multi-outlet")
        .authorization_bearer(auth.access_token())
        .json(&json!({ "enabled": true }))
        .await;

    response.assert_status(StatusCode::FORBIDDEN);
    let body: Value = response.json();
    assert_eq!(body["kind"], "FORBIDDEN");
}

// ── Token refresh ────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_refresh_tokens_on_public_path() {
    let auth = MockAuth::random();
    let tenant_id = Uuid::new_v4();
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![user_row(&auth, tenant_id, None, true)]])
        .append_query_results([vec![tenant_row(tenant_id, "SUSPENDED")]])
        .into_connection();

    let response = server(db)
        .post("/auth/token/refresh")
        .json(&json!({ "refresh_token": auth.refresh_token() }))
        .await;

    response.assert_status(StatusCode::CREATED);
    assert!(
        response
            .headers()
            .contains_key(X_TILLPOINT_ACCESS_TOKEN_EXPIRES)
    );
    let body: Value = response.json();
    assert!(body["access_token"].as_str().is_some());
}
