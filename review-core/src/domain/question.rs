//! Probing question domain types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::lenient;

/// A question generated for a design review submission
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProbingQuestion {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    pub question: String,
    #[serde(default)]
    pub answer: Option<String>,
    /// Difficulty rating assigned by the generator
    #[serde(default, deserialize_with = "lenient::null_as_default")]
    pub difficulty: u32,
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

impl ProbingQuestion {
    /// Whether the candidate has already answered this question
    pub fn is_answered(&self) -> bool {
        self.answer.as_deref().is_some_and(|a| !a.trim().is_empty())
    }
}
