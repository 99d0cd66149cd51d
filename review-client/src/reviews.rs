//! Design review API endpoints

use crate::ReviewClient;
use crate::error::Result;
use review_core::domain::job::JobId;
use review_core::domain::review::DesignReview;
use review_core::dto::review::{DesignReviewForm, UpdateDesignReview};

impl ReviewClient {
    // =============================================================================
    // Design Review Management
    // =============================================================================

    /// List all design reviews
    pub async fn list_design_reviews(&self) -> Result<Vec<DesignReview>> {
        let response = self.client.get(self.url("/design-review/")).send().await?;

        self.handle_response(response).await
    }

    /// Get a design review by ID
    pub async fn get_design_review(&self, id: impl Into<JobId>) -> Result<DesignReview> {
        let url = self.url(&format!("/design-review/{}/", id.into()));
        let response = self.client.get(&url).send().await?;

        self.handle_response(response).await
    }

    /// Submit a new design review
    ///
    /// The submission kicks off question generation on the backend; track it
    /// with the questions or job-status pollers.
    pub async fn create_design_review(&self, form: DesignReviewForm) -> Result<DesignReview> {
        let response = self
            .client
            .post(self.url("/design-review/"))
            .form(&form)
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Partially update a design review
    pub async fn update_design_review(
        &self,
        id: impl Into<JobId>,
        form: UpdateDesignReview,
    ) -> Result<DesignReview> {
        let url = self.url(&format!("/design-review/{}/", id.into()));
        let response = self.client.patch(&url).form(&form).send().await?;

        self.handle_response(response).await
    }

    /// Delete a design review
    pub async fn delete_design_review(&self, id: impl Into<JobId>) -> Result<()> {
        let url = self.url(&format!("/design-review/{}/", id.into()));
        let response = self.client.delete(&url).send().await?;

        self.handle_empty_response(response).await
    }
}
