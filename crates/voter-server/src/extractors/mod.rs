//! Request extractors

pub mod ids;

pub use ids::{PollPath, VoterPath};
