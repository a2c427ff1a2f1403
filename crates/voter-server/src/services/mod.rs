//! Business logic services

pub mod metrics;
pub mod voter_store;

pub use metrics::RequestMetrics;
pub use voter_store::VoterStore;
