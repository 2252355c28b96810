//! Configuration for CMS access.
//!
//! All configuration is loaded from environment variables. Defaults point
//! at the production CMS with a 10 second deadline per attempt.

use std::time::Duration;

use crate::error::CmsError;

/// Production API root.
pub const DEFAULT_BASE_URL: &str = "https://admins.miningdiscovery.com/api/";

/// Default per-attempt deadline in milliseconds.
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;

/// Default number of attempts for call sites that retry.
pub const DEFAULT_RETRY_ATTEMPTS: u32 = 3;

/// Default backoff unit in milliseconds (`unit × attempt` between attempts).
pub const DEFAULT_RETRY_BACKOFF_MS: u64 = 1_000;

/// CMS connection settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CmsConfig {
    /// API root, always ending in `/` (e.g. `https://cms.example.com/api/`).
    pub base_url: String,
    /// Deadline applied to every single attempt.
    pub timeout: Duration,
    /// Attempts for call sites that retry.
    pub retry_attempts: u32,
    /// Backoff unit between retry attempts.
    pub retry_backoff: Duration,
}

impl Default for CmsConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            retry_attempts: DEFAULT_RETRY_ATTEMPTS,
            retry_backoff: Duration::from_millis(DEFAULT_RETRY_BACKOFF_MS),
        }
    }
}

impl CmsConfig {
    /// Load configuration from environment variables.
    ///
    /// Optional variables:
    /// - `CMS_BASE_URL` -- API root (default `https://admins.miningdiscovery.com/api/`)
    /// - `CMS_TIMEOUT_MS` -- per-attempt deadline (default 10000)
    /// - `CMS_RETRY_ATTEMPTS` -- attempts for retrying call sites (default 3)
    /// - `CMS_RETRY_BACKOFF_MS` -- backoff unit (default 1000)
    pub fn from_env() -> Result<Self, CmsError> {
        let base_url =
            std::env::var("CMS_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_owned());

        let timeout_ms: u64 = env_or("CMS_TIMEOUT_MS", DEFAULT_TIMEOUT_MS)?;
        let retry_attempts: u32 = env_or("CMS_RETRY_ATTEMPTS", DEFAULT_RETRY_ATTEMPTS)?;
        let backoff_ms: u64 = env_or("CMS_RETRY_BACKOFF_MS", DEFAULT_RETRY_BACKOFF_MS)?;

        Self::default()
            .with_base_url(&base_url)
            .map(|config| Self {
                timeout: Duration::from_millis(timeout_ms),
                retry_attempts,
                retry_backoff: Duration::from_millis(backoff_ms),
                ..config
            })
    }

    /// Replace the API root, validating it and normalising the trailing `/`.
    pub fn with_base_url(self, base_url: &str) -> Result<Self, CmsError> {
        let trimmed = base_url.trim();
        let parsed = reqwest::Url::parse(trimmed)
            .map_err(|e| CmsError::Config(format!("invalid CMS_BASE_URL {trimmed:?}: {e}")))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(CmsError::Config(format!(
                "CMS_BASE_URL must be http or https, got {}",
                parsed.scheme()
            )));
        }
        let base_url = if trimmed.ends_with('/') {
            trimmed.to_owned()
        } else {
            format!("{trimmed}/")
        };
        Ok(Self { base_url, ..self })
    }
}

/// Read an optional numeric environment variable.
fn env_or<T>(name: &str, default: T) -> Result<T, CmsError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|e| CmsError::Config(format!("invalid {name}: {e}"))),
        Err(_) => Ok(default),
    }
}
