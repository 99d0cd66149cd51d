//! Candidate-related API endpoints

use crate::ReviewClient;
use crate::error::Result;
use review_core::domain::candidate::Candidate;
use review_core::dto::candidate::{CreateCandidate, UpdateCandidate};

impl ReviewClient {
    // =============================================================================
    // Candidate Management
    // =============================================================================

    /// List all candidates
    pub async fn list_candidates(&self) -> Result<Vec<Candidate>> {
        let response = self.client.get(self.url("/candidate/")).send().await?;

        self.handle_response(response).await
    }

    /// Get a candidate by ID
    pub async fn get_candidate(&self, id: u64) -> Result<Candidate> {
        let url = self.url(&format!("/candidate/{}/", id));
        let response = self.client.get(&url).send().await?;

        self.handle_response(response).await
    }

    /// Create a new candidate
    ///
    /// # Example
    /// ```no_run
    /// # use review_client::ReviewClient;
    /// # use review_core::dto::candidate::CreateCandidate;
    /// # async fn example() -> anyhow::Result<()> {
    /// let client = ReviewClient::new("http://localhost:8000/api");
    /// let candidate = client.create_candidate(CreateCandidate {
    ///     name: "Ada".to_string(),
    ///     designation: "Staff Engineer".to_string(),
    /// }).await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn create_candidate(&self, req: CreateCandidate) -> Result<Candidate> {
        let response = self
            .client
            .post(self.url("/candidate/"))
            .json(&req)
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Partially update a candidate
    pub async fn update_candidate(&self, id: u64, req: UpdateCandidate) -> Result<Candidate> {
        let url = self.url(&format!("/candidate/{}/", id));
        let response = self.client.patch(&url).json(&req).send().await?;

        self.handle_response(response).await
    }

    /// Delete a candidate
    pub async fn delete_candidate(&self, id: u64) -> Result<()> {
        let url = self.url(&format!("/candidate/{}/", id));
        let response = self.client.delete(&url).send().await?;

        self.handle_empty_response(response).await
    }
}
