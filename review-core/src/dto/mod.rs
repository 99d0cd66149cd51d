//! Data Transfer Objects for the review API
//!
//! Request and envelope types sent to or received from the API that are not
//! domain entities themselves.

pub mod candidate;
pub mod question;
pub mod review;
