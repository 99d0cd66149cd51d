//! Evaluation API endpoints

use crate::ReviewClient;
use crate::error::Result;
use review_core::domain::evaluation::Evaluation;
use review_core::domain::job::JobId;
use tracing::info;

impl ReviewClient {
    /// Ask the backend to evaluate a design review
    ///
    /// Fire-and-forget: the outcome is observed through
    /// [`ReviewClient::get_evaluation`] or the evaluation poller.
    pub async fn trigger_evaluation(&self, design_review_id: impl Into<JobId>) -> Result<()> {
        let id = design_review_id.into();
        let url = self.url(&format!("/design-review/{}/evaluate/", id));
        let response = self.client.post(&url).send().await?;

        self.handle_empty_response(response).await?;
        info!("Evaluation triggered for design review {}", id);
        Ok(())
    }

    /// Get the evaluation results for a design review
    ///
    /// Returns [`crate::ClientError::NotFound`] until the backend has stored
    /// an evaluation.
    pub async fn get_evaluation(&self, design_review_id: impl Into<JobId>) -> Result<Evaluation> {
        let url = self.url(&format!(
            "/design-review/{}/evaluation/",
            design_review_id.into()
        ));
        let response = self.client.get(&url).send().await?;

        self.handle_response(response).await
    }
}
