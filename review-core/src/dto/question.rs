//! Question DTOs

use serde::{Deserialize, Serialize};

use crate::domain::lenient;
use crate::domain::question::ProbingQuestion;

/// Envelope returned by `GET /design-review/{id}/questions/`
///
/// A missing or `null` `questions` key is read as an empty list.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QuestionsEnvelope {
    #[serde(default, deserialize_with = "lenient::null_as_default")]
    pub questions: Vec<ProbingQuestion>,
}

/// Body of `POST /question/{id}/answer/`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnswerRequest {
    pub answer: String,
}

/// One answer in a bulk submission
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionAnswer {
    #[serde(rename = "questionId")]
    pub question_id: u64,
    pub answer: String,
}

/// Body of `POST /design-review/{id}/questions/answer/`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnswerAllRequest {
    pub answers: Vec<QuestionAnswer>,
}
