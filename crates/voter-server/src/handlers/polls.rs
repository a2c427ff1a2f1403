//! Poll history handlers

use super::{ApiError, MessageResponse};
use crate::extractors::{PollPath, VoterPath};
use crate::AppState;
use axum::{body::Bytes, extract::State, Json};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use voter_core::{VoterError, VoterHistory};

pub async fn list(
    State(state): State<AppState>,
    VoterPath(id): VoterPath,
) -> Result<Json<Vec<VoterHistory>>, ApiError> {
    Ok(Json(state.store.get_poll_history(id).await?))
}

pub async fn get(
    State(state): State<AppState>,
    PollPath { voter_id, poll_id }: PollPath,
) -> Result<Json<VoterHistory>, ApiError> {
    Ok(Json(state.store.get_poll(voter_id, poll_id).await?))
}

#[derive(Debug, Default, Deserialize)]
pub struct RecordPollRequest {
    vote_date: Option<DateTime<Utc>>,
}

/// An empty body records the vote at the current time
fn parse_vote_date(body: &[u8]) -> Result<DateTime<Utc>, VoterError> {
    if body.iter().all(|b| b.is_ascii_whitespace()) {
        return Ok(Utc::now());
    }
    let req: RecordPollRequest =
        serde_json::from_slice(body).map_err(|e| VoterError::InvalidBody(e.to_string()))?;
    Ok(req.vote_date.unwrap_or_else(Utc::now))
}

pub async fn create(
    State(state): State<AppState>,
    PollPath { voter_id, poll_id }: PollPath,
    body: Bytes,
) -> Result<Json<VoterHistory>, ApiError> {
    let vote_date = parse_vote_date(&body)?;
    let entry = state.store.add_poll(voter_id, poll_id, vote_date).await?;
    Ok(Json(entry))
}

pub async fn delete(
    State(state): State<AppState>,
    PollPath { voter_id, poll_id }: PollPath,
) -> Result<Json<MessageResponse>, ApiError> {
    state.store.delete_poll(voter_id, poll_id).await?;
    Ok(Json(MessageResponse::new("Voter poll successfully deleted")))
}
