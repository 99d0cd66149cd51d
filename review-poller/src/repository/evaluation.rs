//! Evaluation probe

use async_trait::async_trait;
use review_client::ReviewClient;
use review_core::domain::evaluation::Evaluation;
use review_core::domain::job::{JobId, RawProbeResult};
use tracing::debug;

use super::{Probe, into_raw};

/// HTTP probe for `GET /design-review/{id}/evaluation/`
#[derive(Debug, Clone)]
pub struct EvaluationProbe {
    client: ReviewClient,
}

impl EvaluationProbe {
    pub fn new(client: ReviewClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Probe for EvaluationProbe {
    type Payload = Evaluation;

    async fn probe(&self, target: &JobId) -> RawProbeResult<Self::Payload> {
        debug!("Probing evaluation for design review {}", target);
        into_raw(self.client.get_evaluation(target.clone()).await)
    }
}
