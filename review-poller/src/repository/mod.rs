//! Repository layer
//!
//! Probes are stateless HTTP queries that abstract communication with the
//! review API. Each performs one request and reports a raw, uninterpreted
//! result without any business logic.
//!
//! All probes are trait-based so the engine can be driven by fakes in tests.

mod evaluation;
mod questions;

use async_trait::async_trait;
use review_client::ClientError;
use review_core::domain::job::{JobId, RawProbeResult};

// Re-export implementations
pub use evaluation::EvaluationProbe;
pub use questions::QuestionsProbe;

/// One remote query yielding a raw, unclassified result
#[async_trait]
pub trait Probe: Send + Sync {
    /// Payload carried by a successful probe
    type Payload: Send;

    /// Query the remote system once for the given target
    async fn probe(&self, target: &JobId) -> RawProbeResult<Self::Payload>;
}

/// Fold a client result into a raw probe result
///
/// 404 is "not yet available"; every other failure, including 4xx,
/// 5xx and unparseable bodies, is a transport error.
pub(crate) fn into_raw<T>(result: Result<T, ClientError>) -> RawProbeResult<T> {
    match result {
        Ok(payload) => RawProbeResult::Ok(payload),
        Err(e) if e.is_not_found() => RawProbeResult::NotFound,
        Err(e) => RawProbeResult::TransportError(e.to_string()),
    }
}
