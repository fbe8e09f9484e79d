//! # Configuration
//!
//! Effective configuration is built in three layers, later ones winning:
//! 1. Built-in defaults
//! 2. Optional TOML file (`--config veridash.toml`)
//! 3. Environment variables
//!
//! ## Environment Variables
//!
//! - `VERIDASH_HOST`, `VERIDASH_PORT`: bind address
//! - `VERIDASH_PAYSTACK_PUBLIC_KEY` (fallback `PAYSTACK_PUBLIC_KEY`): payment key
//! - `VERIDASH_LOGIN_DELAY_MS`: mock credential check delay
//! - `VERIDASH_PREFERENCES_DB`: redb file for persisted preferences
//! - `VERIDASH_CORS_ORIGINS`: comma-separated origins, or `*`
//! - `VERIDASH_RATE_LIMIT`: requests per second, 0 disables

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use veridash_core::VeridashError;

/// Default mock credential check delay, matching the dashboard's simulated login.
pub const DEFAULT_LOGIN_DELAY_MS: u64 = 1500;

/// Default rate limit: 100 requests per second.
pub const DEFAULT_RATE_LIMIT: u32 = 100;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Delay of the mock credential check, in milliseconds.
    pub login_delay_ms: u64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            login_delay_ms: DEFAULT_LOGIN_DELAY_MS,
        }
    }
}

impl AuthConfig {
    #[must_use]
    pub fn login_delay(&self) -> Duration {
        Duration::from_millis(self.login_delay_ms)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaymentsConfig {
    pub paystack_public_key: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreferencesConfig {
    /// redb file. Preferences are kept in memory when unset.
    pub database: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// `None` means localhost only.
    pub cors_origins: Option<String>,
    pub rate_limit: u32,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            cors_origins: None,
            rate_limit: DEFAULT_RATE_LIMIT,
        }
    }
}

/// Complete application configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub auth: AuthConfig,
    pub payments: PaymentsConfig,
    pub preferences: PreferencesConfig,
    pub http: HttpConfig,
}

impl Config {
    /// Parse a TOML document. Missing sections take their defaults.
    pub fn from_toml_str(text: &str) -> Result<Self, VeridashError> {
        toml::from_str(text).map_err(|e| VeridashError::ConfigError(e.to_string()))
    }

    /// Load the file at `path` (if given), then apply environment overrides.
    ///
    /// A path that was given but cannot be read is an error.
    pub fn load(path: Option<&Path>) -> Result<Self, VeridashError> {
        let mut config = match path {
            Some(path) => {
                let text = std::fs::read_to_string(path).map_err(|e| {
                    VeridashError::ConfigError(format!(
                        "Cannot read config file '{}': {}",
                        path.display(),
                        e
                    ))
                })?;
                Self::from_toml_str(&text)?
            }
            None => Self::default(),
        };
        config.apply_overrides(|name| std::env::var(name).ok())?;
        Ok(config)
    }

    /// Apply overrides from a variable lookup (the process environment in
    /// production, a map in tests). Empty values are ignored.
    pub fn apply_overrides(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), VeridashError> {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        if let Some(host) = get("VERIDASH_HOST") {
            self.server.host = host;
        }
        if let Some(port) = get("VERIDASH_PORT") {
            self.server.port = parse_var("VERIDASH_PORT", &port)?;
        }
        if let Some(key) =
            get("VERIDASH_PAYSTACK_PUBLIC_KEY").or_else(|| get("PAYSTACK_PUBLIC_KEY"))
        {
            self.payments.paystack_public_key = key;
        }
        if let Some(delay) = get("VERIDASH_LOGIN_DELAY_MS") {
            self.auth.login_delay_ms = parse_var("VERIDASH_LOGIN_DELAY_MS", &delay)?;
        }
        if let Some(db) = get("VERIDASH_PREFERENCES_DB") {
            self.preferences.database = Some(PathBuf::from(db));
        }
        if let Some(origins) = get("VERIDASH_CORS_ORIGINS") {
            self.http.cors_origins = Some(origins);
        }
        if let Some(limit) = get("VERIDASH_RATE_LIMIT") {
            self.http.rate_limit = parse_var("VERIDASH_RATE_LIMIT", &limit)?;
        }
        Ok(())
    }

    /// `host:port` bind address.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

fn parse_var<T: std::str::FromStr>(name: &str, value: &str) -> Result<T, VeridashError>
where
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse()
        .map_err(|e| VeridashError::ConfigError(format!("{}={:?}: {}", name, value, e)))
}

// =============================================================================
// TESTS
// =============================================================================
