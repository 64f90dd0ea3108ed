//! Configuration types, built from environment variables.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::str::FromStr;
use std::time::Duration;

use axum::http::HeaderValue;

use crate::error::ConfigError;
use crate::relay::smtp::SmtpConfig;

/// Default port for the HTTP listener.
pub const DEFAULT_PORT: u16 = 8080;

/// Default bound on each outbound notification.
pub const DEFAULT_RELAY_TIMEOUT: Duration = Duration::from_secs(5);

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Interface to listen on.
    pub host: IpAddr,
    pub port: u16,
    /// Upper bound for each notification attempt.
    pub relay_timeout: Duration,
    /// Browser origins allowed to post the form cross-origin. Empty means
    /// same-origin only.
    pub allowed_origins: Vec<HeaderValue>,
    /// SMTP relay settings. `None` disables notifications.
    pub smtp: Option<SmtpConfig>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
            relay_timeout: DEFAULT_RELAY_TIMEOUT,
            allowed_origins: Vec::new(),
            smtp: None,
        }
    }
}

impl ServerConfig {
    /// Build config from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build config from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let host = parse_or(&lookup, "MERCH_LEADS_HOST", defaults.host)?;
        let port = parse_or(&lookup, "MERCH_LEADS_PORT", defaults.port)?;
        let relay_timeout = Duration::from_secs(parse_or(
            &lookup,
            "MERCH_LEADS_RELAY_TIMEOUT_SECS",
            defaults.relay_timeout.as_secs(),
        )?);
        if relay_timeout.is_zero() {
            return Err(ConfigError::InvalidValue {
                key: "MERCH_LEADS_RELAY_TIMEOUT_SECS".into(),
                message: "must be at least 1 second".into(),
            });
        }

        let allowed_origins = split_list(lookup("MERCH_LEADS_ALLOWED_ORIGINS"))
            .into_iter()
            .map(|origin| {
                HeaderValue::from_str(&origin).map_err(|e| ConfigError::InvalidValue {
                    key: "MERCH_LEADS_ALLOWED_ORIGINS".into(),
                    message: format!("{origin}: {e}"),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let smtp = SmtpConfig::from_lookup(&lookup)?;

        Ok(Self {
            host,
            port,
            relay_timeout,
            allowed_origins,
            smtp,
        })
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

/// Parse `key` if set, otherwise fall back to `default`.
pub(crate) fn parse_or<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::InvalidValue {
            key: key.to_string(),
            message: format!("{raw:?}: {e}"),
        }),
        None => Ok(default),
    }
}

/// Split a comma-separated variable, dropping blanks.
pub(crate) fn split_list(raw: Option<String>) -> Vec<String> {
    raw.unwrap_or_default()
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
