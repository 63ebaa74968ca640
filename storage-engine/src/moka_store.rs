use async_trait::async_trait;
use globset::Glob;
use moka::Expiry;
use moka::future::Cache;
use shared::{Error, Result, TtlSecs};
use showroom::ports::KeyValueStore;
use std::fmt::Debug;
use std::time::{Duration, Instant};

#[derive(Clone, Debug)]
struct Entry {
    value: String,
    ttl: Duration,
}

/// Each entry expires after the TTL it was written with; an overwrite restarts
/// the clock with the new TTL.
struct PerEntryTtl;

impl Expiry<String, Entry> for PerEntryTtl {
    fn expire_after_create(&self, _key: &String, entry: &Entry, _created_at: Instant) -> Option<Duration> {
        Some(entry.ttl)
    }

    fn expire_after_update(
        &self,
        _key: &String,
        entry: &Entry,
        _updated_at: Instant,
        _duration_until_expiry: Option<Duration>,
    ) -> Option<Duration> {
        Some(entry.ttl)
    }
}

/// In-process key-value store built on Moka
/// Used for single-instance deployments and tests; patterns use glob syntax
pub struct MokaStore {
    cache: Cache<String, Entry>,
}

impl MokaStore {
    /// Create a store, optionally bounded to `max_entries`
    pub fn new(name: &str, max_entries: Option<u64>) -> Self {
        let mut builder = Cache::builder().name(name).expire_after(PerEntryTtl);

        if let Some(capacity) = max_entries {
            builder = builder.max_capacity(capacity);
        }

        Self {
            cache: builder.build(),
        }
    }
}

#[async_trait]
impl KeyValueStore for MokaStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        // None when missing or expired
        Ok(self.cache.get(key).await.map(|entry| entry.value))
    }

    async fn set_with_expiry(&self, key: &str, value: String, ttl: TtlSecs) -> Result<()> {
        if ttl.0 == 0 {
            return Err(Error::Internal("invalid expire time".to_string()));
        }

        self.cache
            .insert(
                key.to_string(),
                Entry {
                    value,
                    ttl: ttl.as_duration(),
                },
            )
            .await;
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<u64> {
        Ok(self.cache.remove(key).await.map_or(0, |_| 1))
    }

    async fn delete_by_pattern(&self, pattern: &str) -> Result<u64> {
        let matcher = Glob::new(pattern)
            .map_err(|e| Error::Pattern(e.to_string()))?
            .compile_matcher();

        let matching: Vec<String> = self
            .cache
            .iter()
            .filter(|(key, _)| matcher.is_match(key.as_str()))
            .map(|(key, _)| key.as_ref().clone())
            .collect();

        for key in &matching {
            self.cache.invalidate(key).await;
        }
        Ok(matching.len() as u64)
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}

impl Debug for MokaStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MokaStore")
            .field("entry_count", &self.cache.entry_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::sleep;

    fn store() -> MokaStore {
        MokaStore::new("test", None)
    }

    #[tokio::test]
    async fn test_moka_store_set_and_get() {
        let store = store();

        store
            .set_with_expiry("hello", "world".to_string(), TtlSecs(60))
            .await
            .unwrap();

        assert_eq!(store.get("hello").await.unwrap().as_deref(), Some("world"));
        assert_eq!(store.get("missing").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_moka_store_delete() {
        let store = store();
        store
            .set_with_expiry("k", "v".to_string(), TtlSecs(60))
            .await
            .unwrap();

        assert_eq!(store.delete("k").await.unwrap(), 1);
        assert_eq!(store.delete("k").await.unwrap(), 0);
        assert_eq!(store.get("k").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_moka_store_per_entry_ttl() {
        let store = store();
        store
            .set_with_expiry("short", "a".to_string(), TtlSecs(1))
            .await
            .unwrap();
        store
            .set_with_expiry("long", "b".to_string(), TtlSecs(60))
            .await
            .unwrap();

        sleep(Duration::from_millis(1100)).await;

        assert_eq!(store.get("short").await.unwrap(), None);
        assert_eq!(store.get("long").await.unwrap().as_deref(), Some("b"));
    }

    #[tokio::test]
    async fn test_moka_store_overwrite_restarts_ttl() {
        let store = store();
        store
            .set_with_expiry("k", "old".to_string(), TtlSecs(1))
            .await
            .unwrap();
        store
            .set_with_expiry("k", "new".to_string(), TtlSecs(60))
            .await
            .unwrap();

        sleep(Duration::from_millis(1100)).await;

        assert_eq!(store.get("k").await.unwrap().as_deref(), Some("new"));
    }

    #[tokio::test]
    async fn test_moka_store_rejects_zero_ttl() {
        let store = store();
        assert!(store
            .set_with_expiry("k", "v".to_string(), TtlSecs(0))
            .await
            .is_err());
    }

    #[tokio::test]
    async fn test_moka_store_delete_by_pattern() {
        let store = store();
        for key in [
            "/api/dealer/d1/vehicles",
            "/api/dealer/d1/vehicles?page=2",
            "/api/dealer/d1/vehicles/v1",
            "/api/dealer/d2/vehicles",
            "user:d1",
        ] {
            store
                .set_with_expiry(key, "[]".to_string(), TtlSecs(60))
                .await
                .unwrap();
        }

        let removed = store
            .delete_by_pattern("/api/dealer/d1/vehicles*")
            .await
            .unwrap();

        assert_eq!(removed, 3);
        assert_eq!(store.get("/api/dealer/d1/vehicles?page=2").await.unwrap(), None);
        assert!(store.get("/api/dealer/d2/vehicles").await.unwrap().is_some());
        assert!(store.get("user:d1").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_moka_store_pattern_character_class() {
        let store = store();
        for key in ["/api/dealer", "/api/dealer?page=2", "/api/dealer/d1"] {
            store
                .set_with_expiry(key, "{}".to_string(), TtlSecs(60))
                .await
                .unwrap();
        }

        let removed = store.delete_by_pattern("/api/dealer[?]*").await.unwrap();

        assert_eq!(removed, 1);
        assert!(store.get("/api/dealer").await.unwrap().is_some());
        assert!(store.get("/api/dealer/d1").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_moka_store_pattern_without_matches() {
        let store = store();
        assert_eq!(store.delete_by_pattern("nothing:*").await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_moka_store_invalid_pattern() {
        let store = store();
        let result = store.delete_by_pattern("[unclosed").await;
        assert!(matches!(result, Err(Error::Pattern(_))));
    }

    #[tokio::test]
    async fn test_moka_store_bounded() {
        let store = MokaStore::new("bounded", Some(2));
        for i in 0..10 {
            store
                .set_with_expiry(&format!("k{i}"), "v".to_string(), TtlSecs(60))
                .await
                .unwrap();
        }

        store.cache.run_pending_tasks().await;
        assert!(store.cache.entry_count() <= 2, "Store should have at most 2 entries");
    }
}
