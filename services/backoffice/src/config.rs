/// Back-office service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct BackofficeConfig {
    /// PostgreSQL connection URL. Env var: `DATABASE_URL`.
    pub database_url: String,
    /// HMAC secret for signing and verifying JWTs. Env var: `JWT_SECRET`.
    pub jwt_secret: String,
    /// TCP port to listen on (default 3120). Env var: `BACKOFFICE_PORT`.
    pub port: u16,
    /// Access token lifetime (default 4h). Env var: `ACCESS_TOKEN_TTL_SECS`.
    pub access_token_ttl_secs: u64,
    /// Refresh token lifetime (default 7d). Env var: `REFRESH_TOKEN_TTL_SECS`.
    pub refresh_token_ttl_secs: u64,
}

pub const DEFAULT_PORT: u16 = 3120;
pub const DEFAULT_ACCESS_TOKEN_TTL_SECS: u64 = 4 * 60 * 60;
pub const DEFAULT_REFRESH_TOKEN_TTL_SECS: u64 = 7 * 24 * 60 * 60;

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} is not set")]
    Missing(&'static str),
    #[error("JWT_SECRET is not set or blank; refusing to start without a signing secret")]
    MissingJwtSecret,
    #[error("{key} has invalid value {value:?}")]
    Invalid { key: &'static str, value: String },
}

impl BackofficeConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let database_url = lookup("DATABASE_URL")
            .filter(|v| !v.is_empty())
            .ok_or(ConfigError::Missing("DATABASE_URL"))?;

        // There is no default secret.
        let jwt_secret = lookup("JWT_SECRET")
            .filter(|v| !v.trim().is_empty())
            .ok_or(ConfigError::MissingJwtSecret)?;

        Ok(Self {
            database_url,
            jwt_secret,
            port: parse_or(&lookup, "BACKOFFICE_PORT", DEFAULT_PORT)?,
            access_token_ttl_secs: parse_or(
                &lookup,
                "ACCESS_TOKEN_TTL_SECS",
                DEFAULT_ACCESS_TOKEN_TTL_SECS,
            )?,
            refresh_token_ttl_secs: parse_or(
                &lookup,
                "REFRESH_TOKEN_TTL_SECS",
                DEFAULT_REFRESH_TOKEN_TTL_SECS,
            )?,
        })
    }
}

fn parse_or<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match lookup(key) {
        None => Ok(default),
        Some(value) => value
            .parse()
            .map_err(|_| ConfigError::Invalid { key, value }),
    }
}
