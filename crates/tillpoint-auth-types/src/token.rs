//! JWT access- and refresh-token validation.

use jsonwebtoken::{DecodingKey, Validation, decode};
use serde::Deserialize;
#[cfg(any(feature = "token-issuer", test))]
use serde::Serialize;
use uuid::Uuid;

use tillpoint_domain::id::UserId;

/// User identity extracted from a validated token.
#[derive(Debug, Clone)]
pub struct TokenInfo {
    pub user_id: UserId,
    pub exp: u64,
}

/// Errors returned by token validation.
///
/// Callers at the HTTP boundary collapse all variants into a single
/// unauthenticated response; the distinction is only for logging.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("invalid signature")]
    InvalidSignature,
    #[error("token expired")]
    Expired,
    #[error("malformed token")]
    Malformed,
    #[error("wrong token kind")]
    WrongKind,
}

/// Distinguishes access tokens from refresh tokens signed with the same secret.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[cfg_attr(any(feature = "token-issuer", test), derive(Serialize))]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Access,
    Refresh,
}

/// JWT claims payload.
///
/// | Field | JWT claim | Meaning |
/// |-------|-----------|---------|
/// | `sub` | `sub` | user ID (UUID string) |
/// | `kind` | custom | `access` or `refresh` |
/// | `exp` | `exp` | expiration, seconds since epoch |
///
/// [`Serialize`] requires the **`token-issuer`** cargo feature; only the
/// back-office service issues tokens.
#[derive(Debug, Deserialize)]
#[cfg_attr(any(feature = "token-issuer", test), derive(Serialize))]
pub struct JwtClaims {
    pub sub: String,
    pub kind: TokenKind,
    pub exp: u64,
}

// ── Core decode (private) ────────────────────────────────────────────────

/// Decode and validate a JWT, returning raw claims.
///
/// Validation: HS256, exp checked, required claims: `exp` + `sub`.
/// Default leeway of 60s tolerates clock skew.
fn decode_jwt(token: &str, secret: &str) -> Result<JwtClaims, AuthError> {
    let mut validation = Validation::new(jsonwebtoken::Algorithm::HS256);
    validation.validate_exp = true;
    validation.required_spec_claims.clear();
    validation.set_required_spec_claims(&["exp", "sub"]);

    let data = decode::<JwtClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::Expired,
        jsonwebtoken::errors::ErrorKind::InvalidSignature
        | jsonwebtoken::errors::ErrorKind::InvalidEcdsaKey
        | jsonwebtoken::errors::ErrorKind::InvalidRsaKey(_) => AuthError::InvalidSignature,
        _ => AuthError::Malformed,
    })?;

    Ok(data.claims)
}

fn validate_kind(token: &str, secret: &str, kind: TokenKind) -> Result<TokenInfo, AuthError> {
    let claims = decode_jwt(token, secret)?;
    if claims.kind != kind {
        return Err(AuthError::WrongKind);
    }
    let user_id = claims
        .sub
        .parse::<Uuid>()
        .map_err(|_| AuthError::Malformed)?;
    Ok(TokenInfo {
        user_id: UserId(user_id),
        exp: claims.exp,
    })
}

// ── Public: all consumers ────────────────────────────────────────────────

/// Validate a bearer access token, returning the subject.
pub fn validate_access_token(token: &str, secret: &str) -> Result<TokenInfo, AuthError> {
    validate_kind(token, secret, TokenKind::Access)
}

/// Validate a refresh token, returning the subject.
pub fn validate_refresh_token(token: &str, secret: &str) -> Result<TokenInfo, AuthError> {
    validate_kind(token, secret, TokenKind::Refresh)
}

// ── Feature-gated: issuer only ───────────────────────────────────────────

/// Sign a token of `kind` for `user_id` that expires `ttl_secs` from now.
///
/// Returns the encoded token and its `exp` claim.
#[cfg(any(feature = "token-issuer", test))]
pub fn issue_token(
    user_id: UserId,
    kind: TokenKind,
    ttl_secs: u64,
    secret: &str,
) -> Result<(String, u64), jsonwebtoken::errors::Error> {
    use jsonwebtoken::{EncodingKey, Header, encode};

    let now = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default();
    let exp = now + ttl_secs;
    let claims = JwtClaims {
        sub: user_id.to_string(),
        kind,
        exp,
    };
    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )?;
    Ok((token, exp))
}
