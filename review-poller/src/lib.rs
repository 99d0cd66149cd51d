//! Review Poller
//!
//! Asynchronous job-status inference and polling engine.
//!
//! Architecture:
//! - Configuration: Poll cadence and API location from environment or defaults
//! - Repository: Probes, one remote query each, returning raw results
//! - Scheduler: The generic polling engine and the three poller channels
//!   (job status, questions generation, evaluation) built on it
//!
//! The review API never pushes job state. A poller repeatedly probes a
//! sub-resource, runs a pure inference rule from `review_core::inference`
//! over the raw result and publishes a snapshot until the job reaches a
//! terminal state, the retry budget runs out, or the caller stops it.

pub mod config;
pub mod repository;
pub mod scheduler;

pub use config::PollerConfig;
pub use repository::{EvaluationProbe, Probe, QuestionsProbe};
pub use scheduler::{Channel, PollHandle, PollingEngine, PollingPolicy, ReviewWatch};
