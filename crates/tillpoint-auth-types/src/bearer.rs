//! `Authorization: Bearer` header parsing.

use axum_extra::headers::{Authorization, HeaderMapExt, authorization::Bearer};
use http::HeaderMap;

use crate::token::AuthError;

/// Read the bearer token from request headers.
///
/// Returns `Ok(None)` when no `Authorization` header is present and
/// [`AuthError::Malformed`] when one is present but is not a bearer credential.
pub fn bearer_token(headers: &HeaderMap) -> Result<Option<String>, AuthError> {
    headers
        .typed_try_get::<Authorization<Bearer>>()
        .map(|auth| auth.map(|a| a.token().to_owned()))
        .map_err(|_| AuthError::Malformed)
}
