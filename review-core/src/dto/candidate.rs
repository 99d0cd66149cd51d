//! Candidate DTOs

use serde::{Deserialize, Serialize};

/// Request to create a candidate
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCandidate {
    pub name: String,
    pub designation: String,
}

/// Partial candidate update; absent fields are left untouched
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateCandidate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub designation: Option<String>,
}
