use axum::{
    Json,
    extract::State,
    http::{HeaderMap, HeaderName, HeaderValue, StatusCode},
    response::IntoResponse,
};
use serde::Deserialize;

use crate::domain::types::X_TILLPOINT_ACCESS_TOKEN_EXPIRES;
use crate::error::BackofficeError;
use crate::state::AppState;
use crate::usecase::token::RefreshTokenUseCase;

fn token_expires_header(exp: u64) -> (HeaderName, HeaderValue) {
    (
        HeaderName::from_static(X_TILLPOINT_ACCESS_TOKEN_EXPIRES),
        HeaderValue::from(exp),
    )
}

// ── POST /auth/token/refresh ─────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct RefreshTokenRequest {
    pub refresh_token: String,
}

pub async fn refresh_token(
    State(state): State<AppState>,
    Json(body): Json<RefreshTokenRequest>,
) -> Result<impl IntoResponse, BackofficeError> {
    let usecase = RefreshTokenUseCase {
        identities: state.identity_repo(),
        jwt_secret: state.jwt_secret.clone(),
        ttl: state.token_ttl,
    };

    let pair = usecase.execute(&body.refresh_token).await?;

    let mut headers = HeaderMap::new();
    let (name, value) = token_expires_header(pair.access_token_exp);
    headers.insert(name, value);

    Ok((StatusCode::CREATED, headers, Json(pair)))
}
