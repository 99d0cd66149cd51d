//! Probing question API endpoints

use crate::ReviewClient;
use crate::error::{ClientError, Result};
use review_core::domain::job::JobId;
use review_core::domain::question::ProbingQuestion;
use review_core::dto::question::{
    AnswerAllRequest, AnswerRequest, QuestionAnswer, QuestionsEnvelope,
};

impl ReviewClient {
    // =============================================================================
    // Questions
    // =============================================================================

    /// Get the generated questions for a design review
    ///
    /// Returns [`ClientError::NotFound`] while generation has not started.
    /// An envelope without a `questions` key yields an empty list.
    pub async fn get_questions(
        &self,
        design_review_id: impl Into<JobId>,
    ) -> Result<Vec<ProbingQuestion>> {
        let url = self.url(&format!(
            "/design-review/{}/questions/",
            design_review_id.into()
        ));
        let response = self.client.get(&url).send().await?;

        let envelope: QuestionsEnvelope = self.handle_response(response).await?;
        Ok(envelope.questions)
    }

    // =============================================================================
    // Answers
    // =============================================================================

    /// Answer a single question
    pub async fn answer_question(
        &self,
        question_id: u64,
        answer: impl Into<String>,
    ) -> Result<()> {
        let answer = answer.into();
        if answer.trim().is_empty() {
            return Err(ClientError::InvalidRequest(
                "answer cannot be empty".to_string(),
            ));
        }

        let url = self.url(&format!("/question/{}/answer/", question_id));
        let response = self
            .client
            .post(&url)
            .json(&AnswerRequest { answer })
            .send()
            .await?;

        self.handle_empty_response(response).await
    }

    /// Submit answers for several questions of one design review at once
    pub async fn answer_all_questions(
        &self,
        design_review_id: impl Into<JobId>,
        answers: Vec<QuestionAnswer>,
    ) -> Result<()> {
        if answers.is_empty() {
            return Ok(());
        }

        let url = self.url(&format!(
            "/design-review/{}/questions/answer/",
            design_review_id.into()
        ));
        let response = self
            .client
            .post(&url)
            .json(&AnswerAllRequest { answers })
            .send()
            .await?;

        self.handle_empty_response(response).await
    }
}
