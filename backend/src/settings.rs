//! Process configuration loaded via OrthoConfig.
//!
//! Two independent groups, each with its own environment prefix:
//!
//! - [`RateLimitSettings`] (`RATE_LIMIT_*`) configures write admission.
//! - [`ServerSettings`] (`FEED_*`) configures the listener and storage.

use std::fmt;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use tracing::warn;

use crate::domain::{DEFAULT_RATE_LIMIT_MAX_PER_WINDOW, DEFAULT_RATE_LIMIT_WINDOW, RateLimitConfig};

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_HOST: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);

/// Numeric setting kept verbatim, so a malformed value falls back to its
/// default instead of aborting startup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct LenientNumber(String);

impl LenientNumber {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// The value as a strictly positive `T`, or `None` when it is not one.
    pub fn positive<T: TryFrom<u64>>(&self) -> Option<T> {
        self.0
            .trim()
            .parse::<u64>()
            .ok()
            .filter(|value| *value > 0)
            .and_then(|value| T::try_from(value).ok())
    }
}

impl fmt::Display for LenientNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

struct LenientNumberVisitor;

impl Visitor<'_> for LenientNumberVisitor {
    type Value = LenientNumber;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a number or a string")
    }

    fn visit_bool<E: de::Error>(self, value: bool) -> Result<Self::Value, E> {
        Ok(LenientNumber(value.to_string()))
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<Self::Value, E> {
        Ok(LenientNumber(value.to_string()))
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<Self::Value, E> {
        Ok(LenientNumber(value.to_string()))
    }

    fn visit_f64<E: de::Error>(self, value: f64) -> Result<Self::Value, E> {
        Ok(LenientNumber(value.to_string()))
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
        Ok(LenientNumber(value.to_owned()))
    }
}

impl<'de> Deserialize<'de> for LenientNumber {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(LenientNumberVisitor)
    }
}

/// Rate limiter settings.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "RATE_LIMIT")]
pub struct RateLimitSettings {
    /// Turn admission control on or off.
    #[ortho_config(default = true)]
    pub enabled: bool,
    /// Window length in seconds.
    #[ortho_config(skip_cli)]
    pub window_sec: Option<LenientNumber>,
    /// Posts allowed per author per window.
    #[ortho_config(skip_cli)]
    pub max_tweets: Option<LenientNumber>,
}

impl RateLimitSettings {
    /// Resolve into a limiter configuration.
    ///
    /// Anything other than a positive integer falls back to the default
    /// with a warning.
    pub fn to_config(&self) -> RateLimitConfig {
        let window_secs = resolve_positive(
            "RATE_LIMIT_WINDOW_SEC",
            self.window_sec.as_ref(),
            DEFAULT_RATE_LIMIT_WINDOW.as_secs(),
        );
        let max_per_window = resolve_positive(
            "RATE_LIMIT_MAX_TWEETS",
            self.max_tweets.as_ref(),
            DEFAULT_RATE_LIMIT_MAX_PER_WINDOW,
        );
        RateLimitConfig {
            enabled: self.enabled,
            window: Duration::from_secs(window_secs),
            max_per_window,
        }
    }
}

fn resolve_positive<T: TryFrom<u64>>(name: &str, raw: Option<&LenientNumber>, default: T) -> T {
    let Some(raw) = raw else {
        return default;
    };
    raw.positive().unwrap_or_else(|| {
        warn!(setting = name, value = %raw, "not a positive integer; using the default");
        default
    })
}

/// Listener and storage settings.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "FEED")]
pub struct ServerSettings {
    /// Interface to bind; defaults to all IPv4 interfaces.
    pub host: Option<String>,
    /// Port to bind; defaults to 8080.
    pub port: Option<u16>,
    /// PostgreSQL URL. When absent the in-memory store is used.
    pub database_url: Option<String>,
    /// Maximum pooled database connections.
    pub db_pool_size: Option<u32>,
}

/// Errors raised while resolving server settings.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    #[error("FEED_HOST is not an IP address: {value}")]
    InvalidHost { value: String },
}

impl ServerSettings {
    /// Socket address to bind.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::InvalidHost`] when `host` does not parse.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let host = match self.host.as_deref() {
            Some(value) => value.parse().map_err(|_| SettingsError::InvalidHost {
                value: value.to_owned(),
            })?,
            None => DEFAULT_HOST,
        };
        Ok(SocketAddr::new(host, self.port.unwrap_or(DEFAULT_PORT)))
    }

    /// Database URL, ignoring blank values.
    pub fn database_url(&self) -> Option<&str> {
        self.database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }
}
