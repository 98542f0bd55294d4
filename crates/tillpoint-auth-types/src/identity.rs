//! Request-scoped identity extractor.

use axum::extract::FromRequestParts;
use http::StatusCode;
use http::request::Parts;

use tillpoint_domain::identity::IdentityContext;

/// Identity context attached to the request by the credential-resolving middleware.
///
/// Returns 401 if no context is present in the request extensions.
/// Permission checks (403) are done by handlers after extraction.
#[derive(Debug, Clone)]
pub struct CurrentIdentity(pub IdentityContext);

impl<S> FromRequestParts<S> for CurrentIdentity
where
    S: Send + Sync,
{
    type Rejection = StatusCode;

    // Extract synchronously and return a 'static future; `async fn` here trips
    // E0195 against axum-core's `impl Future + Send` signature.
    fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let context = parts.extensions.get::<IdentityContext>().cloned();
        async move { context.map(Self).ok_or(StatusCode::UNAUTHORIZED) }
    }
}
