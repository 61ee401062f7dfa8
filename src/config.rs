//! Runtime configuration loaded from the environment.

use std::time::Duration;

/// Remote API base used when `APP_ENV=production`.
pub const PRODUCTION_API_BASE_URL: &str = "https://your-backend-url.railway.app/api";
/// Remote API base used everywhere else.
pub const DEVELOPMENT_API_BASE_URL: &str = "http://localhost:5000/api";

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_BIND_ADDR: &str = "0.0.0.0";

const DEFAULT_WIZARD_TTL_SECS: u64 = 24 * 60 * 60;
/// Matches the client cookie's lifetime.
const DEFAULT_CLIENT_TTL_SECS: u64 = 365 * 24 * 60 * 60;
const DEFAULT_SWEEP_INTERVAL_SECS: u64 = 60 * 60;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid PORT: {0}")]
    InvalidPort(String),
    #[error("invalid {key}: {raw} (expected a positive number of seconds)")]
    InvalidSeconds { key: &'static str, raw: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            _ => Self::Development,
        }
    }

    #[must_use]
    pub fn api_base_url(self) -> &'static str {
        match self {
            Self::Production => PRODUCTION_API_BASE_URL,
            Self::Development => DEVELOPMENT_API_BASE_URL,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub bind_addr: String,
    pub port: u16,
    pub cookie_secure: bool,
    pub app_env: AppEnv,
    pub api_base_url: String,
    /// How long an untouched wizard is kept.
    pub wizard_ttl: Duration,
    /// How long an unseen client keeps its namespace.
    pub client_ttl: Duration,
    pub sweep_interval: Duration,
}

/// Parse a loose boolean: `1/true/yes/on` or `0/false/no/off`.
pub(crate) fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Read `key` as a positive whole number of seconds.
fn seconds<F>(lookup: &F, key: &'static str, default: u64) -> Result<Duration, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(key) else {
        return Ok(Duration::from_secs(default));
    };
    match raw.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ => Err(ConfigError::InvalidSeconds { key, raw }),
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR.to_owned(),
            port: DEFAULT_PORT,
            cookie_secure: false,
            app_env: AppEnv::Development,
            api_base_url: DEVELOPMENT_API_BASE_URL.to_owned(),
            wizard_ttl: Duration::from_secs(DEFAULT_WIZARD_TTL_SECS),
            client_ttl: Duration::from_secs(DEFAULT_CLIENT_TTL_SECS),
            sweep_interval: Duration::from_secs(DEFAULT_SWEEP_INTERVAL_SECS),
        }
    }
}

impl Config {
    /// Load from `PORT`, `BIND_ADDR`, `COOKIE_SECURE`, `APP_ENV`, `API_BASE_URL`,
    /// `WIZARD_TTL_SECS`, `CLIENT_TTL_SECS` and `SWEEP_INTERVAL_SECS`.
    ///
    /// # Errors
    ///
    /// Returns an error if `PORT` is not a valid port number, or a `*_SECS`
    /// value is not a positive integer.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = match lookup("PORT") {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidPort(raw.clone()))?,
            None => DEFAULT_PORT,
        };
        let app_env = lookup("APP_ENV").map_or(AppEnv::Development, |raw| AppEnv::parse(&raw));
        let api_base_url = lookup("API_BASE_URL")
            .filter(|url| !url.trim().is_empty())
            .map_or_else(|| app_env.api_base_url().to_owned(), |url| url.trim_end_matches('/').to_owned());

        Ok(Self {
            bind_addr: lookup("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_owned()),
            port,
            cookie_secure: lookup("COOKIE_SECURE")
                .as_deref()
                .and_then(parse_bool)
                .unwrap_or(false),
            app_env,
            api_base_url,
            wizard_ttl: seconds(&lookup, "WIZARD_TTL_SECS", DEFAULT_WIZARD_TTL_SECS)?,
            client_ttl: seconds(&lookup, "CLIENT_TTL_SECS", DEFAULT_CLIENT_TTL_SECS)?,
            sweep_interval: seconds(&lookup, "SWEEP_INTERVAL_SECS", DEFAULT_SWEEP_INTERVAL_SECS)?,
        })
    }

    #[must_use]
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
