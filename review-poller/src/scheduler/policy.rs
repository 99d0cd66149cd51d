//! Polling policy

use std::time::Duration;

/// Default delay between probes
pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(5);

/// Default attempt budget: five minutes at the default interval
pub const DEFAULT_MAX_ATTEMPTS: u32 = 60;

/// Cadence and retry budget of one poller
///
/// Fixed when the poller starts; a running poller never sees a changed policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollingPolicy {
    /// Delay between the end of one probe and the start of the next
    pub interval: Duration,
    /// Non-terminal attempts allowed before the poller gives up
    pub max_attempts: u32,
}

impl PollingPolicy {
    pub fn new(interval: Duration, max_attempts: u32) -> Self {
        Self {
            interval,
            max_attempts,
        }
    }

    /// Worst-case wall time before the budget runs out, ignoring probe latency
    pub fn ceiling(&self) -> Duration {
        self.interval * self.max_attempts
    }
}

impl Default for PollingPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_INTERVAL, DEFAULT_MAX_ATTEMPTS)
    }
}
