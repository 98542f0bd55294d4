use tillpoint_backoffice::error::BackofficeError;
use tillpoint_backoffice::usecase::identity::ResolveIdentityUseCase;
use tillpoint_domain::tenant::SubscriptionStatus;
use tillpoint_testing::auth::MockAuth;

use crate::helpers::{MockIdentityRepo, TEST_JWT_SECRET, test_identity, test_role, test_tenant};

fn usecase(repo: MockIdentityRepo) -> ResolveIdentityUseCase<MockIdentityRepo> {
    ResolveIdentityUseCase {
        identities: repo,
        jwt_secret: TEST_JWT_SECRET.to_owned(),
    }
}

#[tokio::test]
async fn should_resolve_context_for_active_identity() {
    let auth = MockAuth::random();
    let role = test_role(&["sales.create", "receipts.print", "sales.create"]);
    let identity = test_identity(
        auth.user_id,
        test_tenant(SubscriptionStatus::Active),
        Some(role.clone()),
    );

    let context = usecase(MockIdentityRepo::new(vec![identity.clone()]))
        .execute(Some(&auth.access_token()))
        .await
        .unwrap();

    assert_eq!(context.user_id, auth.user_id);
    assert_eq!(context.tenant_id, identity.tenant.id);
    assert_eq!(context.role_id, Some(role.id));
    assert_eq!(context.permissions.len(), 2);
    assert!(context.has_permission("sales.create"));
    assert!(context.has_permission("receipts.print"));
}

#[tokio::test]
async fn should_resolve_identity_without_role_to_empty_permissions() {
    let auth = MockAuth::random();
    let identity = test_identity(auth.user_id, test_tenant(SubscriptionStatus::Trial), None);

    let context = usecase(MockIdentityRepo::new(vec![identity]))
        .execute(Some(&auth.access_token()))
        .await
        .unwrap();

    assert!(context.role.is_none());
    assert!(context.permissions.is_empty());
}

#[tokio::test]
async fn should_reject_inactive_identity_with_valid_token() {
    let auth = MockAuth::random();
    let mut identity = test_identity(auth.user_id, test_tenant(SubscriptionStatus::Active), None);
    identity.is_active = false;

    let result = usecase(MockIdentityRepo::new(vec![identity]))
        .execute(Some(&auth.access_token()))
        .await;

    assert!(
        matches!(result, Err(BackofficeError::Unauthenticated)),
        "expected Unauthenticated, got {result:?}"
    );
}

#[tokio::test]
async fn should_reject_missing_token() {
    let result = usecase(MockIdentityRepo::empty()).execute(None).await;

    assert!(matches!(result, Err(BackofficeError::Unauthenticated)));
}

#[tokio::test]
async fn should_reject_token_for_unknown_subject() {
    let auth = MockAuth::random();

    let result = usecase(MockIdentityRepo::empty())
        .execute(Some(&auth.access_token()))
        .await;

    assert!(matches!(result, Err(BackofficeError::Unauthenticated)));
}

#[tokio::test]
async fn should_reject_token_signed_with_other_secret() {
    let auth = MockAuth::random().with_secret("some-other-secret");
    let identity = test_identity(auth.user_id, test_tenant(SubscriptionStatus::Active), None);

    let result = usecase(MockIdentityRepo::new(vec![identity]))
        .execute(Some(&auth.access_token()))
        .await;

    assert!(matches!(result, Err(BackofficeError::Unauthenticated)));
}

#[tokio::test]
async fn should_reject_refresh_token_used_as_bearer() {
    let auth = MockAuth::random();
    let identity = test_identity(auth.user_id, test_tenant(SubscriptionStatus::Active), None);

    let result = usecase(MockIdentityRepo::new(vec![identity]))
        .execute(Some(&auth.refresh_token()))
        .await;

    assert!(matches!(result, Err(BackofficeError::Unauthenticated)));
}

#[tokio::test]
async fn should_reject_garbage_token() {
    let result = usecase(MockIdentityRepo::empty())
        .execute(Some("not-a-jwt"))
        .await;

    assert!(matches!(result, Err(BackofficeError::Unauthenticated)));
}
