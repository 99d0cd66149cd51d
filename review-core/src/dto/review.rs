//! Design review DTOs

use serde::{Deserialize, Serialize};

/// Form fields for creating a design review
///
/// Sent as form data, matching what the dashboard submits. Attached
/// documents are uploaded separately and are not part of this form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DesignReviewForm {
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
    pub candidate: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(rename = "overallScore", skip_serializing_if = "Option::is_none")]
    pub overall_score: Option<f64>,
}

/// Partial update of a design review, sent as form data
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateDesignReview {
    #[serde(rename = "problemDescription", skip_serializing_if = "Option::is_none")]
    pub problem_description: Option<String>,
    #[serde(rename = "proposedArchitecture", skip_serializing_if = "Option::is_none")]
    pub proposed_architecture: Option<String>,
    #[serde(rename = "designTradeoffs", skip_serializing_if = "Option::is_none")]
    pub design_tradeoffs: Option<String>,
    #[serde(rename = "scalibilty", skip_serializing_if = "Option::is_none")]
    pub scalability: Option<String>,
    #[serde(rename = "securityMeasures", skip_serializing_if = "Option::is_none")]
    pub security_measures: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maintainability: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(rename = "overallScore", skip_serializing_if = "Option::is_none")]
    pub overall_score: Option<f64>,
}
