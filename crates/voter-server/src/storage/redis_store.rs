//! Redis document store backed by the RedisJSON module
//!
//! Each voter is one JSON document written with `JSON.SET` at the root path
//! and read back whole with `JSON.GET`. Listing uses `KEYS <prefix>*`, which
//! is fine for the modest record counts this service expects.

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::{Client, RedisError};
use tokio::sync::OnceCell;
use tracing::{info, warn};
use voter_core::{DocumentStore, Result, VoterError};

const ROOT_PATH: &str = ".";

pub struct RedisStore {
    client: Client,
    /// Established on first use so the server can start before Redis is up
    conn: OnceCell<ConnectionManager>,
}

fn unavailable(e: RedisError) -> VoterError {
    VoterError::StoreUnavailable(format!("redis: {}", e))
}

/// Accept both `redis://host:port` and a bare `host:port`
pub fn normalize_url(location: &str) -> String {
    if location.contains("://") {
        location.to_string()
    } else {
        format!("redis://{}", location)
    }
}

impl RedisStore {
    pub fn new(location: &str) -> Result<Self> {
        let url = normalize_url(location);
        let client = Client::open(url.as_str()).map_err(unavailable)?;
        Ok(Self {
            client,
            conn: OnceCell::new(),
        })
    }

    async fn connection(&self) -> Result<ConnectionManager> {
        let conn = self
            .conn
            .get_or_try_init(|| async {
                info!("Connecting to redis...");
                ConnectionManager::new(self.client.clone())
                    .await
                    .map_err(|e| {
                        warn!("Redis connection failed: {}", e);
                        unavailable(e)
                    })
            })
            .await?;
        Ok(conn.clone())
    }
}

#[async_trait]
impl DocumentStore for RedisStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let mut conn = self.connection().await?;
        redis::cmd("JSON.GET")
            .arg(key)
            .arg(ROOT_PATH)
            .query_async::<_, Option<String>>(&mut conn)
            .await
            .map_err(unavailable)
    }

    async fn set(&self, key: &str, document: &str) -> Result<()> {
        let mut conn = self.connection().await?;
        redis::cmd("JSON.SET")
            .arg(key)
            .arg(ROOT_PATH)
            .arg(document)
            .query_async::<_, ()>(&mut conn)
            .await
            .map_err(unavailable)
    }

    async fn create(&self, key: &str, document: &str) -> Result<bool> {
        let mut conn = self.connection().await?;
        // NX replies nil when the key already holds a document
        let reply: Option<String> = redis::cmd("JSON.SET")
            .arg(key)
            .arg(ROOT_PATH)
            .arg(document)
            .arg("NX")
            .query_async(&mut conn)
            .await
            .map_err(unavailable)?;
        Ok(reply.is_some())
    }

    async fn delete(&self, keys: &[String]) -> Result<u64> {
        if keys.is_empty() {
            return Ok(0);
        }
        let mut conn = self.connection().await?;
        redis::cmd("DEL")
            .arg(keys)
            .query_async::<_, u64>(&mut conn)
            .await
            .map_err(unavailable)
    }

    async fn keys(&self, prefix: &str) -> Result<Vec<String>> {
        let mut conn = self.connection().await?;
        redis::cmd("KEYS")
            .arg(format!("{}*", prefix))
            .query_async::<_, Vec<String>>(&mut conn)
            .await
            .map_err(unavailable)
    }

    async fn ping(&self) -> Result<()> {
        let mut conn = self.connection().await?;
        redis::cmd("PING")
            .query_async::<_, String>(&mut conn)
            .await
            .map(|_| ())
            .map_err(unavailable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_url() {
        assert_eq!(normalize_url("0.0.0.0:6379"), "redis://0.0.0.0:6379");
        assert_eq!(normalize_url("redis://cache:6379/0"), "redis://cache:6379/0");
    }

    #[test]
    fn test_new_does_not_connect() {
        // Nothing listens here; construction must still succeed
        assert!(RedisStore::new("127.0.0.1:1").is_ok());
    }

    #[test]
    fn test_invalid_url_is_unavailable() {
        let err = RedisStore::new("http://not-redis").err().unwrap();
        assert_eq!(err.kind(), voter_core::ErrorKind::StoreUnavailable);
    }
}
