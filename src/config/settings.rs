//! Process settings read from the environment (after `dotenvy::dotenv()` in the binary).

use crate::error::ConfigError;
use std::time::Duration;

/// Tokens live 15 minutes unless `TOKEN_TTL_SECS` says otherwise.
pub const DEFAULT_TOKEN_TTL_SECS: u64 = 900;
pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;
/// HS256 keys shorter than this are rejected.
pub const MIN_SECRET_LEN: usize = 32;

#[derive(Clone)]
pub struct Settings {
    pub database_url: String,
    /// Host name or IP literal; resolved when the listener binds.
    pub host: String,
    pub port: u16,
    pub jwt_secret: String,
    pub token_ttl: Duration,
    pub max_connections: u32,
    pub auto_migrate: bool,
}

impl std::fmt::Debug for Settings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Settings")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("jwt_secret", &"<redacted>")
            .field("token_ttl", &self.token_ttl)
            .field("max_connections", &self.max_connections)
            .field("auto_migrate", &self.auto_migrate)
            .finish_non_exhaustive()
    }
}

impl Settings {
    /// `(host, port)` for `TcpListener::bind`, which resolves host names.
    pub fn bind_target(&self) -> (&str, u16) {
        (self.host.as_str(), self.port)
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from any key lookup. `DB_CONNECTION_STRING` is accepted when `DATABASE_URL` is unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let database_url = get("DATABASE_URL")
            .or_else(|| get("DB_CONNECTION_STRING"))
            .ok_or(ConfigError::Missing("DATABASE_URL"))?;

        let host = get("HOST").unwrap_or_else(|| "0.0.0.0".into());
        let host = host.trim_start_matches('[').trim_end_matches(']').to_string();
        if host.is_empty() || host.chars().any(char::is_whitespace) {
            return Err(ConfigError::Invalid {
                var: "HOST",
                reason: format!("not a host name or IP address: {:?}", host),
            });
        }
        let port: u16 = parse_or(get("PORT"), "PORT", DEFAULT_PORT)?;

        let jwt_secret = get("JWT_SECRET").ok_or(ConfigError::Missing("JWT_SECRET"))?;
        if jwt_secret.len() < MIN_SECRET_LEN {
            return Err(ConfigError::Invalid {
                var: "JWT_SECRET",
                reason: format!("must be at least {} bytes", MIN_SECRET_LEN),
            });
        }

        let ttl_secs: u64 = parse_or(get("TOKEN_TTL_SECS"), "TOKEN_TTL_SECS", DEFAULT_TOKEN_TTL_SECS)?;
        if ttl_secs == 0 {
            return Err(ConfigError::Invalid {
                var: "TOKEN_TTL_SECS",
                reason: "must be positive".into(),
            });
        }
        let max_connections = parse_or(
            get("DB_MAX_CONNECTIONS"),
            "DB_MAX_CONNECTIONS",
            DEFAULT_MAX_CONNECTIONS,
        )?;
        let auto_migrate = parse_or(get("AUTO_MIGRATE"), "AUTO_MIGRATE", true)?;

        Ok(Settings {
            database_url,
            host,
            port,
            jwt_secret,
            token_ttl: Duration::from_secs(ttl_secs),
            max_connections,
            auto_migrate,
        })
    }
}

fn parse_or<T>(value: Option<String>, var: &'static str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match value {
        None => Ok(default),
        Some(v) => v.parse().map_err(|e: T::Err| ConfigError::Invalid {
            var,
            reason: e.to_string(),
        }),
    }
}
