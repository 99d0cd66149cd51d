//! Job state domain types
//!
//! The review API never returns an explicit job object. Pollers infer one of
//! the [`JobState`] variants from indirect signals and publish a
//! [`PollSnapshot`] after every probe.

use serde::{Deserialize, Serialize};

/// Identifier of the design review (or sub-resource) being tracked
///
/// Opaque to the pollers; the API uses integers but nothing here relies on it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobId(String);

impl JobId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// An empty identifier is treated as absent
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl std::fmt::Display for JobId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<u64> for JobId {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

impl From<&str> for JobId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for JobId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Logical state of a background job
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobState {
    #[default]
    Pending,
    Processing,
    Completed,
    Failed,
}

impl JobState {
    /// `Completed` and `Failed` end polling
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Processing => "processing",
            Self::Completed => "completed",
            Self::Failed => "failed",
        }
    }
}

impl std::fmt::Display for JobState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Externally observable state of one poller
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PollSnapshot {
    pub state: JobState,
    /// Progress estimate, 0-100
    pub progress: u8,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aux_count: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl PollSnapshot {
    pub fn is_terminal(&self) -> bool {
        self.state.is_terminal()
    }
}

/// Outcome of a single probe, before any interpretation
#[derive(Debug, Clone, PartialEq)]
pub enum RawProbeResult<T> {
    Ok(T),
    NotFound,
    TransportError(String),
}
