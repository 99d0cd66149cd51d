//! Review Core
//!
//! Core types and abstractions for the design review tracker.
//!
//! This crate contains:
//! - Domain types: Core business entities (Candidate, DesignReview, questions, scores)
//!   and the job-state model the pollers publish
//! - DTOs: Request bodies sent to the review API
//! - Inference rules: Pure mapping from raw probe results to job states
//! - Score normalization onto the canonical 0-5 scale

pub mod domain;
pub mod dto;
pub mod inference;
pub mod score;
