//! Error types for the voter store

use crate::{PollId, VoterId};
use std::time::Duration;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, VoterError>;

#[derive(Error, Debug)]
pub enum VoterError {
    #[error("Invalid {field}: {value:?} is not an unsigned 32-bit integer")]
    InvalidId { field: &'static str, value: String },

    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    #[error("Voter not found: {0}")]
    VoterNotFound(VoterId),

    #[error("Poll {poll_id} not found for voter {voter_id}")]
    PollNotFound { voter_id: VoterId, poll_id: PollId },

    #[error("Voter already exists: {0}")]
    VoterExists(VoterId),

    #[error("Poll {poll_id} already recorded for voter {voter_id}")]
    PollExists { voter_id: VoterId, poll_id: PollId },

    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Store call timed out after {0:?}")]
    Timeout(Duration),

    #[error("Store inconsistency: {0}")]
    Inconsistent(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Coarse classification used at the transport boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    NotFound,
    Conflict,
    StoreUnavailable,
    Internal,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Validation => "validation",
            ErrorKind::NotFound => "not_found",
            ErrorKind::Conflict => "conflict",
            ErrorKind::StoreUnavailable => "store_unavailable",
            ErrorKind::Internal => "internal",
        }
    }

    /// Server faults, as opposed to outcomes the caller can act on
    pub fn is_server_fault(&self) -> bool {
        matches!(self, ErrorKind::StoreUnavailable | ErrorKind::Internal)
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl VoterError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            VoterError::InvalidId { .. } | VoterError::InvalidBody(_) => ErrorKind::Validation,
            VoterError::VoterNotFound(_) | VoterError::PollNotFound { .. } => ErrorKind::NotFound,
            VoterError::VoterExists(_) | VoterError::PollExists { .. } => ErrorKind::Conflict,
            VoterError::StoreUnavailable(_) | VoterError::Timeout(_) => {
                ErrorKind::StoreUnavailable
            }
            VoterError::Inconsistent(_) | VoterError::Serialization(_) => ErrorKind::Internal,
        }
    }
}

impl From<serde_json::Error> for VoterError {
    fn from(e: serde_json::Error) -> Self {
        VoterError::Serialization(e.to_string())
    }
}
