//! Design review domain types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::lenient;
use crate::domain::question::ProbingQuestion;
use crate::score::normalize;

/// A design submission under review
///
/// Field names follow the review API, including its `scalibilty` spelling.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DesignReview {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    #[serde(rename = "problemDescription")]
    pub problem_description: String,
    #[serde(rename = "proposedArchitecture")]
    pub proposed_architecture: String,
    #[serde(rename = "designTradeoffs")]
    pub design_tradeoffs: String,
    #[serde(rename = "scalibilty")]
    pub scalability: String,
    #[serde(rename = "securityMeasures")]
    pub security_measures: String,
    pub maintainability: String,
    /// Candidate ID
    pub candidate: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<DesignReviewStatus>,
    #[serde(
        rename = "submissionDate",
        default,
        deserialize_with = "lenient::optional_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub submission_date: Option<DateTime<Utc>>,
    #[serde(
        rename = "overallScore",
        default,
        deserialize_with = "lenient::optional_score",
        skip_serializing_if = "Option::is_none"
    )]
    pub overall_score: Option<f64>,
    #[serde(
        rename = "createdOn",
        default,
        deserialize_with = "lenient::optional_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_on: Option<DateTime<Utc>>,
    #[serde(
        rename = "updatedOn",
        default,
        deserialize_with = "lenient::optional_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub updated_on: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub documents: Vec<DesignDocument>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub probing_questions: Vec<ProbingQuestion>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub scores: Vec<DesignReviewScore>,
}

impl DesignReview {
    /// Overall score on the 0-5 scale
    ///
    /// The first stored score record wins when any exist, even if its score
    /// is still null; `overallScore` is read only for reviews without records.
    pub fn score_out_of_five(&self) -> Option<f64> {
        let raw = match self.scores.first() {
            Some(record) => record.overallscore,
            None => self.overall_score,
        };
        raw.map(|raw| normalize(Some(raw)))
    }
}

/// Dashboard totals over a list of reviews
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ReviewTotals {
    pub total: usize,
    /// `Completed` or `Finalized`
    pub completed: usize,
    /// `Pending` or `In Progress`
    pub pending: usize,
    /// Mean of the scored reviews on the 0-5 scale, 0 when none is scored
    pub average_score: f64,
}

impl ReviewTotals {
    pub fn from_reviews(reviews: &[DesignReview]) -> Self {
        let count = |wanted: &[DesignReviewStatus]| {
            reviews
                .iter()
                .filter(|r| r.status.is_some_and(|s| wanted.contains(&s)))
                .count()
        };

        let scores: Vec<f64> = reviews
            .iter()
            .filter_map(DesignReview::score_out_of_five)
            .collect();
        let average_score = if scores.is_empty() {
            0.0
        } else {
            scores.iter().sum::<f64>() / scores.len() as f64
        };

        Self {
            total: reviews.len(),
            completed: count(&[DesignReviewStatus::Completed, DesignReviewStatus::Finalized]),
            pending: count(&[DesignReviewStatus::Pending, DesignReviewStatus::InProgress]),
            average_score,
        }
    }
}

/// Review workflow status as reported by the API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DesignReviewStatus {
    Pending,
    Incomplete,
    Completed,
    #[serde(rename = "Questions Generated")]
    QuestionsGenerated,
    #[serde(rename = "In Progress")]
    InProgress,
    Reviewed,
    Finalized,
    #[serde(other)]
    Unknown,
}

impl DesignReviewStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Incomplete => "Incomplete",
            Self::Completed => "Completed",
            Self::QuestionsGenerated => "Questions Generated",
            Self::InProgress => "In Progress",
            Self::Reviewed => "Reviewed",
            Self::Finalized => "Finalized",
            Self::Unknown => "Unknown",
        }
    }
}

impl std::fmt::Display for DesignReviewStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A document attached to a design review
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DesignDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    #[serde(rename = "isProcessed", default, skip_serializing_if = "Option::is_none")]
    pub is_processed: Option<DocumentProcessing>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(rename = "type")]
    pub content_type: String,
    pub size: u64,
    #[serde(
        rename = "createdOn",
        default,
        deserialize_with = "lenient::optional_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_on: Option<DateTime<Utc>>,
    #[serde(
        rename = "updatedOn",
        default,
        deserialize_with = "lenient::optional_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub updated_on: Option<DateTime<Utc>>,
}

/// Processing state of an uploaded document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentProcessing {
    Error,
    Pending,
    Processing,
    Analyzed,
    Done,
}

/// A stored score record for a design review
///
/// Scores are kept in the raw scale the backend produced; use
/// [`crate::score::normalize`] before displaying them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DesignReviewScore {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    #[serde(default, deserialize_with = "lenient::optional_score")]
    pub overallscore: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(rename = "reviewedOn", default, skip_serializing_if = "Option::is_none")]
    pub reviewed_on: Option<String>,
    #[serde(rename = "technicalDepth", default, deserialize_with = "lenient::optional_score")]
    pub technical_depth: Option<f64>,
    #[serde(rename = "systemDesign", default, deserialize_with = "lenient::optional_score")]
    pub system_design: Option<f64>,
    #[serde(default, deserialize_with = "lenient::optional_score")]
    pub tradeoff: Option<f64>,
    #[serde(default, deserialize_with = "lenient::optional_score")]
    pub ownership: Option<f64>,
    #[serde(
        rename = "feedbackSummary",
        default,
        deserialize_with = "lenient::null_as_default"
    )]
    pub feedback_summary: String,
}
