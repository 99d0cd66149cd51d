//! Poller configuration
//!
//! Defines where the review API lives and how often pollers probe it.

use std::time::Duration;

use review_client::DEFAULT_BASE_URL;

use crate::scheduler::PollingPolicy;
use crate::scheduler::policy::{DEFAULT_INTERVAL, DEFAULT_MAX_ATTEMPTS};

/// Poller configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollerConfig {
    /// Review API base URL (e.g., "http://localhost:8000/api")
    pub api_url: String,

    /// Delay between probes
    pub poll_interval: Duration,

    /// Non-terminal attempts before a poller reports a timeout
    pub max_attempts: u32,
}

impl PollerConfig {
    /// Creates a new configuration with default cadence
    pub fn new(api_url: String) -> Self {
        Self {
            api_url,
            poll_interval: DEFAULT_INTERVAL,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }

    /// Creates configuration from environment variables
    ///
    /// Expected environment variables (all optional):
    /// - REVIEW_API_URL (default: http://localhost:8000/api)
    /// - REVIEW_POLL_INTERVAL_MS (milliseconds, default: 5000)
    /// - REVIEW_MAX_ATTEMPTS (default: 60)
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable lookup
    fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let api_url = lookup("REVIEW_API_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let poll_interval = match lookup("REVIEW_POLL_INTERVAL_MS") {
            Some(raw) => Duration::from_millis(raw.trim().parse::<u64>().map_err(|e| {
                anyhow::anyhow!(
                    "REVIEW_POLL_INTERVAL_MS must be a number of milliseconds: {}",
                    e
                )
            })?),
            None => DEFAULT_INTERVAL,
        };

        let max_attempts = match lookup("REVIEW_MAX_ATTEMPTS") {
            Some(raw) => raw
                .trim()
                .parse::<u32>()
                .map_err(|e| anyhow::anyhow!("REVIEW_MAX_ATTEMPTS must be a number: {}", e))?,
            None => DEFAULT_MAX_ATTEMPTS,
        };

        Ok(Self {
            api_url,
            poll_interval,
            max_attempts,
        })
    }

    /// Validates the configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.api_url.is_empty() {
            anyhow::bail!("api_url cannot be empty");
        }

        if !self.api_url.starts_with("http://") && !self.api_url.starts_with("https://") {
            anyhow::bail!("api_url must start with http:// or https://");
        }

        if self.poll_interval.is_zero() {
            anyhow::bail!("poll_interval must be greater than 0");
        }

        if self.max_attempts == 0 {
            anyhow::bail!("max_attempts must be greater than 0");
        }

        Ok(())
    }

    /// Polling policy shared by every channel
    pub fn policy(&self) -> PollingPolicy {
        PollingPolicy::new(self.poll_interval, self.max_attempts)
    }
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL.to_string())
    }
}
