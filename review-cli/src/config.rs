//! Configuration module
//!
//! Resolved CLI settings shared by every command.

use review_client::ReviewClient;
use review_poller::{PollerConfig, PollingPolicy};

/// CLI configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// API location and polling cadence
    pub poller: PollerConfig,
}

impl Config {
    /// Client for the configured API
    pub fn client(&self) -> ReviewClient {
        ReviewClient::new(&self.poller.api_url)
    }

    pub fn policy(&self) -> PollingPolicy {
        self.poller.policy()
    }
}
