//! Store doubles for tests. Other crates enable them through the
//! `test-support` feature.

use crate::ports::KeyValueStore;
use async_trait::async_trait;
use shared::{Error, Result, TtlSecs};
use std::collections::HashMap;
use std::time::Instant;
use tokio::sync::Mutex;

/// HashMap store honouring expiry. Patterns support a single trailing `*` only.
#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, (String, Instant)>>,
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let mut entries = self.entries.lock().await;
        match entries.get(key) {
            Some((_, expires_at)) if *expires_at <= Instant::now() => {
                entries.remove(key);
                Ok(None)
            }
            Some((value, _)) => Ok(Some(value.clone())),
            None => Ok(None),
        }
    }

    async fn set_with_expiry(&self, key: &str, value: String, ttl: TtlSecs) -> Result<()> {
        let expires_at = Instant::now() + ttl.as_duration();
        self.entries
            .lock()
            .await
            .insert(key.to_string(), (value, expires_at));
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<u64> {
        Ok(self.entries.lock().await.remove(key).map_or(0, |_| 1))
    }

    async fn delete_by_pattern(&self, pattern: &str) -> Result<u64> {
        let prefix = pattern.strip_suffix('*').unwrap_or(pattern);
        let mut entries = self.entries.lock().await;
        let before = entries.len();
        entries.retain(|key, _| !key.starts_with(prefix));
        Ok((before - entries.len()) as u64)
    }

    fn backend_name(&self) -> &'static str {
        "test-memory"
    }
}

/// Store whose every call fails, as if the connection had dropped.
pub struct FailingStore;

#[async_trait]
impl KeyValueStore for FailingStore {
    async fn get(&self, _key: &str) -> Result<Option<String>> {
        Err(Error::Store("connection refused".into()))
    }

    async fn set_with_expiry(&self, _key: &str, _value: String, _ttl: TtlSecs) -> Result<()> {
        Err(Error::Store("connection refused".into()))
    }

    async fn delete(&self, _key: &str) -> Result<u64> {
        Err(Error::Store("connection refused".into()))
    }

    async fn delete_by_pattern(&self, _pattern: &str) -> Result<u64> {
        Err(Error::Store("connection refused".into()))
    }

    fn backend_name(&self) -> &'static str {
        "failing"
    }
}
