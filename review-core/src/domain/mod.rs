//! Core domain types
//!
//! This module contains the core domain structures used across the review
//! crates. Resource types mirror the JSON shapes served by the review API;
//! the job module holds the logical state model published by the pollers.

pub mod candidate;
pub mod evaluation;
pub mod job;
pub mod question;
pub mod review;

pub(crate) mod lenient;
