//! Key-value document storage

use crate::Result;
use async_trait::async_trait;

/// Key-value store holding one JSON document per key.
///
/// Implementations map backend failures to `VoterError::StoreUnavailable`.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Fetch the raw JSON document stored at `key`
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write `document` at `key`, replacing whatever is there
    async fn set(&self, key: &str, document: &str) -> Result<()>;

    /// Write `document` only if `key` is absent. Returns false when the key
    /// already existed and nothing was written.
    async fn create(&self, key: &str, document: &str) -> Result<bool>;

    /// Remove the given keys, returning how many were actually removed
    async fn delete(&self, keys: &[String]) -> Result<u64>;

    /// Enumerate every key starting with `prefix`
    async fn keys(&self, prefix: &str) -> Result<Vec<String>>;

    /// Check that the backend answers
    async fn ping(&self) -> Result<()>;
}
