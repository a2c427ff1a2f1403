//! Voter record store
//!
//! Owns voter records keyed by `voter:<id>`. A record is one JSON document;
//! nested poll history changes re-read and rewrite the whole document.
//!
//! Poll mutations and single deletes for the same voter are serialized by a
//! striped in-process lock, so concurrent requests to one server never lose
//! an update. Separate server processes sharing a backend are not
//! coordinated.

use chrono::{DateTime, Utc};
use std::collections::HashSet;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, MutexGuard};
use tracing::{debug, info, warn};
use voter_core::{
    parse_voter_key, voter_key, DocumentStore, PollId, Result, Voter, VoterError, VoterHistory,
    VoterId, VoterList, VOTER_KEY_PREFIX,
};

/// Number of lock stripes guarding read-modify-write sequences
const LOCK_STRIPES: usize = 64;

pub struct VoterStore {
    backend: Arc<dyn DocumentStore>,
    timeout: Duration,
    locks: Vec<Mutex<()>>,
}

impl VoterStore {
    pub fn new(backend: Arc<dyn DocumentStore>, timeout: Duration) -> Self {
        Self {
            backend,
            timeout,
            locks: (0..LOCK_STRIPES).map(|_| Mutex::new(())).collect(),
        }
    }

    /// Run one backend call under the configured timeout
    async fn call<T, F>(&self, op: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        match tokio::time::timeout(self.timeout, op).await {
            Ok(result) => result,
            Err(_) => {
                warn!("Store call exceeded {:?}", self.timeout);
                Err(VoterError::Timeout(self.timeout))
            }
        }
    }

    async fn lock(&self, id: VoterId) -> MutexGuard<'_, ()> {
        self.locks[id as usize % LOCK_STRIPES].lock().await
    }

    async fn load(&self, id: VoterId) -> Result<Voter> {
        let key = voter_key(id);
        let document = self
            .call(self.backend.get(&key))
            .await?
            .ok_or(VoterError::VoterNotFound(id))?;
        Ok(serde_json::from_str(&document)?)
    }

    async fn save(&self, voter: &Voter) -> Result<()> {
        let document = serde_json::to_string(voter)?;
        self.call(self.backend.set(&voter_key(voter.voter_id), &document))
            .await
    }

    pub async fn ping(&self) -> Result<()> {
        self.call(self.backend.ping()).await
    }

    pub async fn get(&self, id: VoterId) -> Result<Voter> {
        self.load(id).await
    }

    /// All stored voters. Empty when nothing is stored.
    pub async fn list(&self) -> Result<VoterList> {
        let keys = self.call(self.backend.keys(VOTER_KEY_PREFIX)).await?;
        let mut list = VoterList::new();

        for key in keys {
            if parse_voter_key(&key).is_none() {
                warn!("Skipping foreign key in voter namespace: {}", key);
                continue;
            }
            match self.call(self.backend.get(&key)).await? {
                Some(document) => {
                    list.insert(serde_json::from_str(&document)?);
                }
                // Removed between enumeration and fetch
                None => debug!("Key {} vanished during listing", key),
            }
        }

        Ok(list)
    }

    pub async fn add(&self, voter: &Voter) -> Result<()> {
        info!("Adding voter: id={}, name={}", voter.voter_id, voter.name);

        let mut seen = HashSet::with_capacity(voter.voter_history.len());
        if let Some(dup) = voter.voter_history.iter().find(|h| !seen.insert(h.poll_id)) {
            return Err(VoterError::InvalidBody(format!(
                "poll_id {} appears more than once in voter_history",
                dup.poll_id
            )));
        }

        let document = serde_json::to_string(voter)?;
        let created = self
            .call(self.backend.create(&voter_key(voter.voter_id), &document))
            .await?;
        if !created {
            return Err(VoterError::VoterExists(voter.voter_id));
        }
        Ok(())
    }

    pub async fn delete(&self, id: VoterId) -> Result<()> {
        info!("Deleting voter: {}", id);

        let _guard = self.lock(id).await;
        let removed = self.call(self.backend.delete(&[voter_key(id)])).await?;
        if removed == 0 {
            return Err(VoterError::VoterNotFound(id));
        }
        Ok(())
    }

    /// Remove every voter. Fails if fewer keys were removed than enumerated.
    pub async fn delete_all(&self) -> Result<u64> {
        // Stripes are always taken in ascending order
        let mut guards = Vec::with_capacity(LOCK_STRIPES);
        for lock in &self.locks {
            guards.push(lock.lock().await);
        }

        let keys = self.call(self.backend.keys(VOTER_KEY_PREFIX)).await?;
        let removed = self.call(self.backend.delete(&keys)).await?;
        info!("Deleted {} of {} voters", removed, keys.len());

        if removed != keys.len() as u64 {
            return Err(VoterError::Inconsistent(format!(
                "enumerated {} voters but removed {}",
                keys.len(),
                removed
            )));
        }
        Ok(removed)
    }

    pub async fn get_poll_history(&self, id: VoterId) -> Result<Vec<VoterHistory>> {
        Ok(self.load(id).await?.voter_history)
    }

    pub async fn get_poll(&self, id: VoterId, poll_id: PollId) -> Result<VoterHistory> {
        self.load(id)
            .await?
            .poll(poll_id)
            .cloned()
            .ok_or(VoterError::PollNotFound {
                voter_id: id,
                poll_id,
            })
    }

    pub async fn add_poll(
        &self,
        id: VoterId,
        poll_id: PollId,
        vote_date: DateTime<Utc>,
    ) -> Result<VoterHistory> {
        debug!("Recording poll {} for voter {}", poll_id, id);

        let _guard = self.lock(id).await;
        let mut voter = self.load(id).await?;
        if voter.has_poll(poll_id) {
            return Err(VoterError::PollExists {
                voter_id: id,
                poll_id,
            });
        }

        let entry = VoterHistory::new(poll_id, vote_date);
        voter.voter_history.push(entry.clone());
        self.save(&voter).await?;

        Ok(entry)
    }

    pub async fn delete_poll(&self, id: VoterId, poll_id: PollId) -> Result<VoterHistory> {
        debug!("Removing poll {} from voter {}", poll_id, id);

        let _guard = self.lock(id).await;
        let mut voter = self.load(id).await?;
        let removed = voter.remove_poll(poll_id).ok_or(VoterError::PollNotFound {
            voter_id: id,
            poll_id,
        })?;
        self.save(&voter).await?;

        Ok(removed)
    }

    /// Insert the two demo voters. Existing records are left alone.
    pub async fn seed_sample_voters(&self) -> Result<usize> {
        let now = Utc::now();
        let samples = [
            Voter::new(0, "Moo Moo").with_history(VoterHistory::new(0, now)),
            Voter::new(1, "Totoro").with_history(VoterHistory::new(0, now)),
        ];

        let mut seeded = 0;
        for voter in &samples {
            match self.add(voter).await {
                Ok(()) => seeded += 1,
                Err(VoterError::VoterExists(id)) => debug!("Sample voter {} already present", id),
                Err(e) => return Err(e),
            }
        }

        info!("Seeded {} sample voters", seeded);
        Ok(seeded)
    }
}
