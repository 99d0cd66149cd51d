//! Scheduler layer
//!
//! This layer runs probes on a timer. [`PollingEngine`] is the single
//! generic implementation; [`channels`] instantiates it once per signal the
//! application tracks and bundles the three into a [`ReviewWatch`].

pub mod channels;
pub mod engine;
pub mod policy;

pub use channels::{Channel, ReviewWatch};
pub use engine::{PollHandle, PollingEngine};
pub use policy::PollingPolicy;
