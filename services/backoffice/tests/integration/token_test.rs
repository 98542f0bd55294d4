use tillpoint_auth_types::token::{validate_access_token, validate_refresh_token};
use tillpoint_backoffice::error::BackofficeError;
use tillpoint_backoffice::usecase::token::{RefreshTokenUseCase, TokenTtl, issue_token_pair};
use tillpoint_domain::tenant::SubscriptionStatus;
use tillpoint_testing::auth::MockAuth;

use crate::helpers::{MockIdentityRepo, TEST_JWT_SECRET, test_identity, test_tenant};

const TTL: TokenTtl = TokenTtl {
    access_secs: 900,
    refresh_secs: 86_400,
};

fn usecase(repo: MockIdentityRepo) -> RefreshTokenUseCase<MockIdentityRepo> {
    RefreshTokenUseCase {
        identities: repo,
        jwt_secret: TEST_JWT_SECRET.to_owned(),
        ttl: TTL,
    }
}

// ── issue_token_pair ─────────────────────────────────────────────────────────

#[test]
fn should_issue_pair_of_distinct_kinds() {
    let auth = MockAuth::random();
    let pair = issue_token_pair(auth.user_id, TTL, TEST_JWT_SECRET).unwrap();

    let access = validate_access_token(&pair.access_token, TEST_JWT_SECRET).unwrap();
    assert_eq!(access.user_id, auth.user_id);
    assert_eq!(access.exp, pair.access_token_exp);

    let refresh = validate_refresh_token(&pair.refresh_token, TEST_JWT_SECRET).unwrap();
    assert_eq!(refresh.user_id, auth.user_id);
    assert!(pair.refresh_token_exp > pair.access_token_exp);

    assert!(validate_access_token(&pair.refresh_token, TEST_JWT_SECRET).is_err());
}

// ── RefreshTokenUseCase ──────────────────────────────────────────────────────

#[tokio::test]
async fn should_refresh_pair_for_active_identity() {
    let auth = MockAuth::random();
    let identity = test_identity(auth.user_id, test_tenant(SubscriptionStatus::Active), None);

    let pair = usecase(MockIdentityRepo::new(vec![identity]))
        .execute(&auth.refresh_token())
        .await
        .unwrap();

    let claims = validate_access_token(&pair.access_token, TEST_JWT_SECRET).unwrap();
    assert_eq!(claims.user_id, auth.user_id);
}

#[tokio::test]
async fn should_refuse_refresh_for_inactive_identity() {
    let auth = MockAuth::random();
    let mut identity = test_identity(auth.user_id, test_tenant(SubscriptionStatus::Active), None);
    identity.is_active = false;

    let result = usecase(MockIdentityRepo::new(vec![identity]))
        .execute(&auth.refresh_token())
        .await;

    assert!(
        matches!(result, Err(BackofficeError::Unauthenticated)),
        "expected Unauthenticated, got {result:?}"
    );
}

#[tokio::test]
async fn should_refuse_refresh_for_deleted_identity() {
    let auth = MockAuth::random();

    let result = usecase(MockIdentityRepo::empty())
        .execute(&auth.refresh_token())
        .await;

    assert!(matches!(result, Err(BackofficeError::Unauthenticated)));
}

#[tokio::test]
async fn should_refuse_access_token_as_refresh_token() {
    let auth = MockAuth::random();
    let identity = test_identity(auth.user_id, test_tenant(SubscriptionStatus::Active), None);

    let result = usecase(MockIdentityRepo::new(vec![identity]))
        .execute(&auth.access_token())
        .await;

    assert!(matches!(result, Err(BackofficeError::Unauthenticated)));
}

#[tokio::test]
async fn should_refuse_refresh_token_signed_with_other_secret() {
    let auth = MockAuth::random().with_secret("other-secret");
    let identity = test_identity(auth.user_id, test_tenant(SubscriptionStatus::Active), None);

    let result = usecase(MockIdentityRepo::new(vec![identity]))
        .execute(&auth.refresh_token())
        .await;

    assert!(matches!(result, Err(BackofficeError::Unauthenticated)));
}
