use std::fmt::Display;
use std::str::FromStr;

use crate::auth::jwt::{JwtConfig, DEFAULT_EXPIRY_HOURS};

/// Origins the browser client is served from.
const DEFAULT_CORS_ORIGINS: &str = "https://kililamusic.fun,https://www.kililamusic.fun,\
                                    https://killaimusic.fun,https://www.killaimusic.fun,\
                                    http://localhost:5173,http://localhost:3000";

/// 10 MB, matching the largest project payloads the client uploads.
const DEFAULT_BODY_LIMIT_BYTES: usize = 10 * 1024 * 1024;

/// Startup configuration errors. Any of these aborts the process.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{var} has invalid value '{value}': {reason}")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}

/// Log output format for the tracing subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" | "pretty" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            other => Err(format!("expected 'text' or 'json', got '{other}'")),
        }
    }
}

/// Server configuration loaded from environment variables.
///
/// Everything except the database URL and JWT secret has a default suitable
/// for local development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3001`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS`.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Maximum accepted request body size (default: 10 MB).
    pub body_limit_bytes: usize,
    pub database_url: String,
    /// Pool size (default: `20`).
    pub database_max_connections: u32,
    /// JWT token configuration (secret, expiry).
    pub jwt: JwtConfig,
    /// Accept the demo credentials without a password check.
    pub demo_login_enabled: bool,
    pub log_format: LogFormat,
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// | Env Var                    | Default                  |
    /// |----------------------------|--------------------------|
    /// | `HOST`                     | `0.0.0.0`                |
    /// | `PORT`                     | `3001`                   |
    /// | `CORS_ORIGINS`             | production + dev origins |
    /// | `REQUEST_TIMEOUT_SECS`     | `30`                     |
    /// | `BODY_LIMIT_BYTES`         | `10485760`               |
    /// | `DATABASE_URL`             | **required**             |
    /// | `DATABASE_MAX_CONNECTIONS` | `20`                     |
    /// | `JWT_SECRET`               | **required**             |
    /// | `JWT_EXPIRY_HOURS`         | `168`                    |
    /// | `DEMO_LOGIN_ENABLED`       | `false`                  |
    /// | `LOG_FORMAT`               | `text`                   |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".into());
        let port = parse_or(&lookup, "PORT", 3001u16)?;

        let cors_origins: Vec<String> = lookup("CORS_ORIGINS")
            .unwrap_or_else(|| DEFAULT_CORS_ORIGINS.into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs = parse_or(&lookup, "REQUEST_TIMEOUT_SECS", 30u64)?;
        let body_limit_bytes = parse_or(&lookup, "BODY_LIMIT_BYTES", DEFAULT_BODY_LIMIT_BYTES)?;

        let database_url = required(&lookup, "DATABASE_URL")?;
        let database_max_connections = parse_or(&lookup, "DATABASE_MAX_CONNECTIONS", 20u32)?;

        let secret = required(&lookup, "JWT_SECRET")?;
        let expiry_hours = parse_or(&lookup, "JWT_EXPIRY_HOURS", DEFAULT_EXPIRY_HOURS)?;
        if expiry_hours <= 0 {
            return Err(ConfigError::Invalid {
                var: "JWT_EXPIRY_HOURS",
                value: expiry_hours.to_string(),
                reason: "must be positive".into(),
            });
        }

        let demo_login_enabled = parse_or(&lookup, "DEMO_LOGIN_ENABLED", false)?;
        let log_format = parse_or(&lookup, "LOG_FORMAT", LogFormat::Text)?;

        Ok(Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            body_limit_bytes,
            database_url,
            database_max_connections,
            jwt: JwtConfig {
                secret,
                expiry_hours,
            },
            demo_login_enabled,
            log_format,
        })
    }
}

/// A variable that must be present and non-blank.
fn required<F>(lookup: &F, var: &'static str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(var) {
        Some(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ConfigError::Missing(var)),
    }
}

fn parse_or<F, T>(lookup: &F, var: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: Display,
{
    match lookup(var) {
        None => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            var,
            value: raw.clone(),
            reason: e.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use assert_matches::assert_matches;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    const REQUIRED: [(&str, &str); 2] = [
        ("DATABASE_URL", "postgres://localhost/studio"),
        ("JWT_SECRET", "s3cret"),
    ];

    #[test]
    fn defaults_apply() {
        let config = ServerConfig::from_lookup(lookup_from(&REQUIRED)).unwrap();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 3001);
        assert_eq!(config.request_timeout_secs, 30);
        assert_eq!(config.body_limit_bytes, 10_485_760);
        assert_eq!(config.database_max_connections, 20);
        assert_eq!(config.jwt.expiry_hours, 168);
        assert!(!config.demo_login_enabled);
        assert_eq!(config.log_format, LogFormat::Text);
        assert_eq!(config.cors_origins.len(), 6);
        assert!(config
            .cors_origins
            .contains(&"http://localhost:5173".to_string()));
    }

    #[test]
    fn missing_secret_is_error() {
        let result = ServerConfig::from_lookup(lookup_from(&[(
            "DATABASE_URL",
            "postgres://localhost/studio",
        )]));
        assert_matches!(result, Err(ConfigError::Missing("JWT_SECRET")));
    }

    #[test]
    fn blank_database_url_is_missing() {
        let result = ServerConfig::from_lookup(lookup_from(&[
            ("DATABASE_URL", "  "),
            ("JWT_SECRET", "s3cret"),
        ]));
        assert_matches!(result, Err(ConfigError::Missing("DATABASE_URL")));
    }

    #[test]
    fn invalid_port_is_error() {
        let mut pairs = REQUIRED.to_vec();
        pairs.push(("PORT", "http"));
        let result = ServerConfig::from_lookup(lookup_from(&pairs));
        assert_matches!(result, Err(ConfigError::Invalid { var: "PORT", .. }));
    }

    #[test]
    fn overrides_parse() {
        let mut pairs = REQUIRED.to_vec();
        pairs.extend([
            ("CORS_ORIGINS", "https://a.example, https://b.example,"),
            ("DEMO_LOGIN_ENABLED", "true"),
            ("LOG_FORMAT", "JSON"),
            ("JWT_EXPIRY_HOURS", "2"),
        ]);
        let config = ServerConfig::from_lookup(lookup_from(&pairs)).unwrap();
        assert_eq!(
            config.cors_origins,
            vec!["https://a.example", "https://b.example"]
        );
        assert!(config.demo_login_enabled);
        assert_eq!(config.log_format, LogFormat::Json);
        assert_eq!(config.jwt.expiry_hours, 2);
    }

    #[test]
    fn non_positive_expiry_rejected() {
        let mut pairs = REQUIRED.to_vec();
        pairs.push(("JWT_EXPIRY_HOURS", "0"));
        let result = ServerConfig::from_lookup(lookup_from(&pairs));
        assert_matches!(
            result,
            Err(ConfigError::Invalid {
                var: "JWT_EXPIRY_HOURS",
                ..
            })
        );
    }
}
