use serde::{Deserialize, Serialize};

/// Permission required to change a tenant's feature entitlements.
pub const MANAGE_ENTITLEMENTS_PERMISSION: &str = "entitlements.manage";

/// Response header carrying the new access token's `exp` (seconds since epoch).
pub const X_TILLPOINT_ACCESS_TOKEN_EXPIRES: &str = "x-tillpoint-access-token-expires";

/// Freshly issued access/refresh token pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenPair {
    pub access_token: String,
    pub access_token_exp: u64,
    pub refresh_token: String,
    pub refresh_token_exp: u64,
}
