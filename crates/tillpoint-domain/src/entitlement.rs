//! Per-tenant feature entitlements.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::id::TenantId;

/// Maximum length of a feature code.
pub const FEATURE_CODE_MAX_LEN: usize = 64;

/// Feature identifier, e.g. `multi-outlet` or `receipts.whatsapp`.
///
/// Lowercase ASCII letters, digits, `-`, `_` and `.`; 1–64 characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct FeatureCode(String);

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid feature code: {0:?}")]
pub struct InvalidFeatureCode(pub String);

impl FeatureCode {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for FeatureCode {
    type Err = InvalidFeatureCode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let valid = !s.is_empty()
            && s.len() <= FEATURE_CODE_MAX_LEN
            && s.chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || matches!(c, '-' | '_' | '.'));
        if valid {
            Ok(Self(s.to_owned()))
        } else {
            Err(InvalidFeatureCode(s.to_owned()))
        }
    }
}

impl<'de> Deserialize<'de> for FeatureCode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

impl fmt::Display for FeatureCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Feature flag for one tenant. At most one record exists per `(tenant_id, feature_code)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntitlementRecord {
    pub tenant_id: TenantId,
    pub feature_code: FeatureCode,
    pub enabled: bool,
    pub config: Option<serde_json::Value>,
    pub updated_at: DateTime<Utc>,
}
