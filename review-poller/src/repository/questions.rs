//! Questions probe
//!
//! Queries `GET /design-review/{id}/questions/`. Drives both the
//! questions-generation and the job-status channels.

use async_trait::async_trait;
use review_client::ReviewClient;
use review_core::domain::job::{JobId, RawProbeResult};
use review_core::domain::question::ProbingQuestion;
use tracing::debug;

use super::{Probe, into_raw};

/// HTTP probe for the generated question list
#[derive(Debug, Clone)]
pub struct QuestionsProbe {
    client: ReviewClient,
}

impl QuestionsProbe {
    pub fn new(client: ReviewClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Probe for QuestionsProbe {
    type Payload = Vec<ProbingQuestion>;

    async fn probe(&self, target: &JobId) -> RawProbeResult<Self::Payload> {
        debug!("Probing questions for design review {}", target);
        into_raw(self.client.get_questions(target.clone()).await)
    }
}
