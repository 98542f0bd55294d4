/// Paths reachable without an identity context and exempt from the entitlement gate.
pub const PUBLIC_PATHS: &[&str] = &[
    "/auth/sign-in",
    "/auth/register",
    "/auth/token/refresh",
    "/health",
    "/healthz",
    "/readyz",
];

/// Segment-boundary prefix match against [`PUBLIC_PATHS`].
///
/// `/health` and `/health/db` are public; `/healthcheck` is not.
pub fn is_public_path(path: &str) -> bool {
    PUBLIC_PATHS.iter().any(|entry| {
        path.strip_prefix(entry)
            .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
    })
}
