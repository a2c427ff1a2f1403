//! Voter handlers

use super::{ApiError, MessageResponse};
use crate::extractors::VoterPath;
use crate::AppState;
use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::{Deserialize, Serialize};
use voter_core::{Voter, VoterError, VoterHistory, VoterId};

pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Voter>>, ApiError> {
    let voters = state.store.list().await?;
    Ok(Json(voters.into_voters()))
}

pub async fn get(
    State(state): State<AppState>,
    VoterPath(id): VoterPath,
) -> Result<Json<Voter>, ApiError> {
    Ok(Json(state.store.get(id).await?))
}

/// Body of `POST /voters/:id`. The path id wins; a body id is optional but
/// must agree with it.
#[derive(Debug, Deserialize)]
pub struct CreateVoterRequest {
    voter_id: Option<VoterId>,
    name: String,
    #[serde(default)]
    voter_history: Vec<VoterHistory>,
}

pub async fn create(
    State(state): State<AppState>,
    VoterPath(id): VoterPath,
    body: Result<Json<CreateVoterRequest>, JsonRejection>,
) -> Result<Json<Voter>, ApiError> {
    let Json(req) = body.map_err(|e| VoterError::InvalidBody(e.body_text()))?;

    if let Some(body_id) = req.voter_id {
        if body_id != id {
            return Err(VoterError::InvalidBody(format!(
                "voter_id {} does not match path id {}",
                body_id, id
            ))
            .into());
        }
    }

    let voter = Voter {
        voter_id: id,
        name: req.name,
        voter_history: req.voter_history,
    };
    state.store.add(&voter).await?;

    Ok(Json(voter))
}

pub async fn delete(
    State(state): State<AppState>,
    VoterPath(id): VoterPath,
) -> Result<Json<MessageResponse>, ApiError> {
    state.store.delete(id).await?;
    Ok(Json(MessageResponse::new("Voter successfully deleted")))
}

#[derive(Debug, Serialize)]
pub struct DeleteAllResponse {
    message: String,
    deleted: u64,
}

pub async fn delete_all(
    State(state): State<AppState>,
) -> Result<Json<DeleteAllResponse>, ApiError> {
    let deleted = state.store.delete_all().await?;
    Ok(Json(DeleteAllResponse {
        message: "All voters successfully deleted".to_string(),
        deleted,
    }))
}

#[derive(Debug, Serialize)]
pub struct SeedResponse {
    message: String,
    seeded: usize,
}

pub async fn seed(State(state): State<AppState>) -> Result<Json<SeedResponse>, ApiError> {
    let seeded = state.store.seed_sample_voters().await?;
    Ok(Json(SeedResponse {
        message: "Sample voters added".to_string(),
        seeded,
    }))
}
