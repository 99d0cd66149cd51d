//! Evaluation payload
//!
//! The evaluation endpoint is loosely typed: while the backend is still
//! scoring it may return a partial object, a status-only object, or the full
//! score record. Every field is optional and unknown fields are kept in
//! [`Evaluation::extra`].

use serde::{Deserialize, Serialize};

use super::lenient;

/// Evaluation result as returned by `GET /design-review/{id}/evaluation/`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient::optional_score",
        skip_serializing_if = "Option::is_none"
    )]
    pub overallscore: Option<f64>,
    #[serde(
        rename = "technicalDepth",
        default,
        deserialize_with = "lenient::optional_score",
        skip_serializing_if = "Option::is_none"
    )]
    pub technical_depth: Option<f64>,
    #[serde(
        rename = "systemDesign",
        default,
        deserialize_with = "lenient::optional_score",
        skip_serializing_if = "Option::is_none"
    )]
    pub system_design: Option<f64>,
    #[serde(
        default,
        deserialize_with = "lenient::optional_score",
        skip_serializing_if = "Option::is_none"
    )]
    pub tradeoff: Option<f64>,
    #[serde(
        default,
        deserialize_with = "lenient::optional_score",
        skip_serializing_if = "Option::is_none"
    )]
    pub ownership: Option<f64>,
    #[serde(rename = "feedbackSummary", default, skip_serializing_if = "Option::is_none")]
    pub feedback_summary: Option<String>,
    #[serde(rename = "reviewedOn", default, skip_serializing_if = "Option::is_none")]
    pub reviewed_on: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Evaluation {
    /// Status marker reported by the backend, lowercased
    fn status_marker(&self) -> Option<String> {
        self.status.as_deref().map(|s| s.trim().to_ascii_lowercase())
    }

    /// Whether the payload says the evaluation is finished
    ///
    /// Either an explicit `completed` status or a non-null overall score counts.
    pub fn is_complete(&self) -> bool {
        self.status_marker().as_deref() == Some("completed") || self.overallscore.is_some()
    }

    /// Whether the backend explicitly reports the evaluation as failed
    pub fn is_failed(&self) -> bool {
        matches!(self.status_marker().as_deref(), Some("failed" | "error"))
    }
}
