use async_trait::async_trait;
use redis::AsyncCommands;
use redis::aio::ConnectionManager;
use shared::{Error, Result, TtlSecs};
use showroom::ports::KeyValueStore;
use std::fmt::Debug;

/// Key-value store backed by a shared Redis server.
///
/// The connection manager reconnects on its own; every operation works on a
/// cheap clone of it, so the store can be shared freely across requests.
#[derive(Clone)]
pub struct RedisStore {
    conn: ConnectionManager,
}

impl RedisStore {
    pub async fn connect(url: &str) -> Result<Self> {
        let client = redis::Client::open(url).map_err(store_error)?;
        let conn = ConnectionManager::new(client).await.map_err(store_error)?;
        Ok(Self { conn })
    }
}

fn store_error(e: redis::RedisError) -> Error {
    Error::Store(e.to_string())
}

#[async_trait]
impl KeyValueStore for RedisStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let mut conn = self.conn.clone();
        conn.get(key).await.map_err(store_error)
    }

    async fn set_with_expiry(&self, key: &str, value: String, ttl: TtlSecs) -> Result<()> {
        let mut conn = self.conn.clone();
        conn.set_ex::<_, _, ()>(key, value, ttl.0)
            .await
            .map_err(store_error)
    }

    async fn delete(&self, key: &str) -> Result<u64> {
        let mut conn = self.conn.clone();
        conn.del(key).await.map_err(store_error)
    }

    async fn delete_by_pattern(&self, pattern: &str) -> Result<u64> {
        let mut conn = self.conn.clone();
        let keys: Vec<String> = conn.keys(pattern).await.map_err(store_error)?;

        // Keys written between the two round trips survive until their TTL
        if keys.is_empty() {
            return Ok(0);
        }
        conn.del(keys).await.map_err(store_error)
    }

    fn backend_name(&self) -> &'static str {
        "redis"
    }
}

impl Debug for RedisStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisStore").finish_non_exhaustive()
    }
}
