//! Voter Types - Pure record definitions
//!
//! This crate contains only the data types shared by the store and the
//! HTTP layer. It has no async runtime or storage dependencies.

pub mod voter;

pub use voter::*;

/// Voter identifier, assigned by the client on creation
pub type VoterId = u32;

/// Poll identifier within a voter's history
pub type PollId = u32;
