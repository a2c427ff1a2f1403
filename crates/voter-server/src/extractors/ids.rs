//! Typed path identifiers
//!
//! Path segments arrive as text and must be unsigned 32-bit integers.
//! Anything else is rejected with 400 before a handler runs.

use crate::handlers::ApiError;
use axum::{
    async_trait,
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use voter_core::{parse_id, PollId, VoterError, VoterId};

/// `/voters/:id`
#[derive(Debug, Clone, Copy)]
pub struct VoterPath(pub VoterId);

/// `/voters/:id/polls/:poll_id`
#[derive(Debug, Clone, Copy)]
pub struct PollPath {
    pub voter_id: VoterId,
    pub poll_id: PollId,
}

fn malformed(field: &'static str, detail: String) -> ApiError {
    ApiError(VoterError::InvalidId {
        field,
        value: detail,
    })
}

#[async_trait]
impl<S> FromRequestParts<S> for VoterPath
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| malformed("id", e.body_text()))?;
        Ok(VoterPath(parse_id("id", &raw)?))
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for PollPath
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path((raw_voter, raw_poll)) = Path::<(String, String)>::from_request_parts(parts, state)
            .await
            .map_err(|e| malformed("path", e.body_text()))?;
        Ok(PollPath {
            voter_id: parse_id("id", &raw_voter)?,
            poll_id: parse_id("pollId", &raw_poll)?,
        })
    }
}
