//! Candidate domain types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::lenient;
use crate::domain::review::DesignReview;

/// A person whose design submissions are reviewed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Candidate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    pub name: String,
    pub designation: String,
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
    pub design_reviews: Vec<DesignReview>,
}
