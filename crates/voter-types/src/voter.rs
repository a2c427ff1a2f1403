//! Voter types

use crate::{PollId, VoterId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One recorded vote in a voter's history
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoterHistory {
    pub poll_id: PollId,
    pub vote_date: DateTime<Utc>,
}

impl VoterHistory {
    pub fn new(poll_id: PollId, vote_date: DateTime<Utc>) -> Self {
        Self { poll_id, vote_date }
    }
}

/// Voter record, stored as a single JSON document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Voter {
    pub voter_id: VoterId,
    pub name: String,
    /// Insertion order is preserved
    #[serde(default)]
    pub voter_history: Vec<VoterHistory>,
}

impl Voter {
    /// Create a voter with an empty history
    pub fn new(voter_id: VoterId, name: impl Into<String>) -> Self {
        Self {
            voter_id,
            name: name.into(),
            voter_history: Vec::new(),
        }
    }

    /// Builder-style history entry append
    pub fn with_history(mut self, entry: VoterHistory) -> Self {
        self.voter_history.push(entry);
        self
    }

    /// Linear scan for a poll entry
    pub fn poll(&self, poll_id: PollId) -> Option<&VoterHistory> {
        self.voter_history.iter().find(|h| h.poll_id == poll_id)
    }

    pub fn has_poll(&self, poll_id: PollId) -> bool {
        self.poll(poll_id).is_some()
    }

    /// Remove the entry for `poll_id`, keeping the order of the rest
    pub fn remove_poll(&mut self, poll_id: PollId) -> Option<VoterHistory> {
        let idx = self
            .voter_history
            .iter()
            .position(|h| h.poll_id == poll_id)?;
        Some(self.voter_history.remove(idx))
    }
}

/// Transient listing view keyed by voter id
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoterList {
    pub voters: BTreeMap<VoterId, Voter>,
}

impl VoterList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, voter: Voter) -> Option<Voter> {
        self.voters.insert(voter.voter_id, voter)
    }

    pub fn len(&self) -> usize {
        self.voters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.voters.is_empty()
    }

    /// Flatten into a vector ordered by voter id
    pub fn into_voters(self) -> Vec<Voter> {
        self.voters.into_values().collect()
    }
}

impl FromIterator<Voter> for VoterList {
    fn from_iter<I: IntoIterator<Item = Voter>>(iter: I) -> Self {
        let mut list = Self::new();
        for voter in iter {
            list.insert(voter);
        }
        list
    }
}
