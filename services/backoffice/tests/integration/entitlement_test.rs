use chrono::{Duration, Utc};
use serde_json::json;
use uuid::Uuid;

use tillpoint_backoffice::domain::types::MANAGE_ENTITLEMENTS_PERMISSION;
use tillpoint_backoffice::error::BackofficeError;
use tillpoint_backoffice::usecase::entitlement::{
    ListEntitlementsUseCase, SetEntitlementInput, SetEntitlementUseCase,
};
use tillpoint_domain::id::UserId;
use tillpoint_domain::identity::IdentityContext;
use tillpoint_domain::tenant::SubscriptionStatus;

use crate::helpers::{MockEntitlementRepo, test_identity, test_role, test_tenant};

fn caller(codes: &[&str]) -> IdentityContext {
    IdentityContext::from_identity(test_identity(
        UserId(Uuid::new_v4()),
        test_tenant(SubscriptionStatus::Active),
        Some(test_role(codes)),
    ))
}

fn input(feature_code: &str, enabled: bool) -> SetEntitlementInput {
    SetEntitlementInput {
        feature_code: feature_code.to_owned(),
        enabled,
        config: None,
    }
}

#[tokio::test]
async fn should_upsert_repeated_write_for_same_feature() {
    let repo = MockEntitlementRepo::new();
    let records = repo.records_handle();
    let usecase = SetEntitlementUseCase { entitlements: repo };
    let caller = caller(&[MANAGE_ENTITLEMENTS_PERMISSION]);
    let first_at = Utc::now();

    usecase
        .execute(&caller, input("multi-outlet", true), first_at)
        .await
        .unwrap();
    usecase
        .execute(
            &caller,
            SetEntitlementInput {
                config: Some(json!({ "max_outlets": 3 })),
                ..input("multi-outlet", false)
            },
            first_at + Duration::seconds(5),
        )
        .await
        .unwrap();

    let records = records.lock().unwrap();
    assert_eq!(records.len(), 1, "second write must not duplicate the record");
    let record = records.values().next().unwrap();
    assert_eq!(record.tenant_id, caller.tenant_id);
    assert_eq!(record.feature_code.as_str(), "multi-outlet");
    assert!(!record.enabled);
    assert_eq!(record.config, Some(json!({ "max_outlets": 3 })));
    assert_eq!(record.updated_at, first_at + Duration::seconds(5));
}

#[tokio::test]
async fn should_scope_write_to_callers_tenant() {
    let repo = MockEntitlementRepo::new();
    let records = repo.records_handle();
    let usecase = SetEntitlementUseCase { entitlements: repo };
    let caller = caller(&[MANAGE_ENTITLEMENTS_PERMISSION]);

    let record = usecase
        .execute(&caller, input("receipts.whatsapp", true), Utc::now())
        .await
        .unwrap();

    assert_eq!(record.tenant_id, caller.tenant_id);
    assert!(
        records
            .lock()
            .unwrap()
            .contains_key(&(caller.tenant_id, "receipts.whatsapp".to_owned()))
    );
}

#[tokio::test]
async fn should_forbid_write_without_manage_permission() {
    let repo = MockEntitlementRepo::new();
    let records = repo.records_handle();
    let usecase = SetEntitlementUseCase { entitlements: repo };

    let result = usecase
        .execute(&caller(&["sales.create"]), input("multi-outlet", true), Utc::now())
        .await;

    assert!(
        matches!(result, Err(BackofficeError::Forbidden)),
        "expected Forbidden, got {result:?}"
    );
    assert!(records.lock().unwrap().is_empty());
}

#[tokio::test]
async fn should_reject_invalid_feature_code() {
    let usecase = SetEntitlementUseCase {
        entitlements: MockEntitlementRepo::new(),
    };

    let result = usecase
        .execute(
            &caller(&[MANAGE_ENTITLEMENTS_PERMISSION]),
            input("Multi Outlet", true),
            Utc::now(),
        )
        .await;

    assert!(matches!(result, Err(BackofficeError::InvalidFeatureCode)));
}

#[tokio::test]
async fn should_list_only_callers_tenant_records() {
    let repo = MockEntitlementRepo::new();
    let records = repo.records_handle();
    let writer = SetEntitlementUseCase { entitlements: repo };
    let caller = caller(&[MANAGE_ENTITLEMENTS_PERMISSION]);
    writer
        .execute(&caller, input("multi-outlet", true), Utc::now())
        .await
        .unwrap();

    let mut other = caller.clone();
    other.tenant_id = tillpoint_domain::id::TenantId(Uuid::new_v4());
    writer
        .execute(&other, input("multi-outlet", true), Utc::now())
        .await
        .unwrap();

    let lister = ListEntitlementsUseCase {
        entitlements: MockEntitlementRepo { records },
    };
    let listed = lister.execute(&caller).await.unwrap();

    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].tenant_id, caller.tenant_id);
}
