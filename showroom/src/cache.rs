use crate::store_client::StoreClient;
use serde::Serialize;
use serde::de::DeserializeOwned;
use shared::TtlSecs;
use tracing::{debug, warn};

/// Typed, best-effort cache over the key-value store.
///
/// Values travel as JSON strings. Nothing here returns an error: a failed or
/// disabled store, an unserializable value, or a corrupted payload all end up
/// as a miss or `false`. The cache holds no state besides the shared client.
#[derive(Clone, Debug)]
pub struct Cache {
    client: StoreClient,
}

impl Cache {
    pub fn new(client: StoreClient) -> Self {
        Self { client }
    }

    pub fn disabled() -> Self {
        Self::new(StoreClient::disabled())
    }

    pub fn is_enabled(&self) -> bool {
        self.client.is_enabled()
    }

    pub fn backend_name(&self) -> &'static str {
        self.client.backend_name()
    }

    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = self.client.get(key).await?;
        match serde_json::from_str(&raw) {
            Ok(value) => {
                debug!(key = %key, "cache hit");
                Some(value)
            }
            Err(e) => {
                warn!(key = %key, error = %e, "Discarding undecodable cache entry");
                None
            }
        }
    }

    /// Store `value` under `key`; `None` uses [`TtlSecs::DEFAULT`].
    pub async fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T, ttl: Option<TtlSecs>) -> bool {
        if !self.client.is_enabled() {
            return false;
        }
        let raw = match serde_json::to_string(value) {
            Ok(raw) => raw,
            Err(e) => {
                warn!(key = %key, error = %e, "Cache value serialization error");
                return false;
            }
        };
        self.client
            .set_with_expiry(key, raw, ttl.unwrap_or_default())
            .await
    }

    pub async fn delete(&self, key: &str) -> bool {
        self.client.delete(key).await
    }

    pub async fn delete_pattern(&self, pattern: &str) -> bool {
        self.client.delete_by_pattern(pattern).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{FailingStore, MemoryStore};
    use serde::Deserialize;
    use serde_json::json;
    use std::collections::BTreeMap;
    use std::sync::Arc;
    use std::time::Duration;

    fn memory_cache() -> Cache {
        Cache::new(StoreClient::connected(Arc::new(MemoryStore::default())))
    }

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct Vehicle {
        id: u32,
        brand: String,
    }

    #[tokio::test]
    async fn test_set_get_delete_dealer_vehicles() {
        let cache = memory_cache();
        let vehicles = vec![Vehicle {
            id: 1,
            brand: "Yamaha".to_string(),
        }];

        assert!(cache.set("dealer:123:vehicles", &vehicles, Some(TtlSecs(300))).await);

        let cached: Option<Vec<Vehicle>> = cache.get("dealer:123:vehicles").await;
        assert_eq!(cached, Some(vehicles));

        assert!(cache.delete("dealer:123:vehicles").await);
        let cached: Option<Vec<Vehicle>> = cache.get("dealer:123:vehicles").await;
        assert_eq!(cached, None);
    }

    #[tokio::test]
    async fn test_entry_expires_after_ttl() {
        let cache = memory_cache();

        assert!(cache.set("short", &json!({"a": 1}), Some(TtlSecs(1))).await);
        assert_eq!(cache.get::<serde_json::Value>("short").await, Some(json!({"a": 1})));

        tokio::time::sleep(Duration::from_millis(1100)).await;
        assert_eq!(cache.get::<serde_json::Value>("short").await, None);
    }

    #[tokio::test]
    async fn test_set_replaces_whole_value() {
        let cache = memory_cache();

        cache.set("k", &json!({"a": 1, "b": 2}), None).await;
        cache.set("k", &json!({"c": 3}), None).await;

        assert_eq!(cache.get::<serde_json::Value>("k").await, Some(json!({"c": 3})));
    }

    #[tokio::test]
    async fn test_undecodable_entry_is_a_miss() {
        let client = StoreClient::connected(Arc::new(MemoryStore::default()));
        client
            .set_with_expiry("corrupt", "{not json".to_string(), TtlSecs(60))
            .await;
        let cache = Cache::new(client);

        assert_eq!(cache.get::<serde_json::Value>("corrupt").await, None);
        // Valid JSON of the wrong shape is also a miss
        cache.set("shape", &json!("text"), None).await;
        assert_eq!(cache.get::<Vec<Vehicle>>("shape").await, None);
    }

    #[tokio::test]
    async fn test_unserializable_value_is_rejected() {
        let cache = memory_cache();
        let mut map = BTreeMap::new();
        map.insert((1, 2), "tuple keys are not valid JSON object keys");

        assert!(!cache.set("bad", &map, None).await);
        assert_eq!(cache.get::<serde_json::Value>("bad").await, None);
    }

    #[tokio::test]
    async fn test_unreachable_store_fails_open() {
        let cache = Cache::new(StoreClient::connected(Arc::new(FailingStore)));

        assert_eq!(cache.get::<serde_json::Value>("k").await, None);
        assert!(!cache.set("k", &json!(1), None).await);
        assert!(!cache.delete("k").await);
        assert!(!cache.delete_pattern("k*").await);
    }

    #[tokio::test]
    async fn test_disabled_cache() {
        let cache = Cache::disabled();

        assert!(!cache.is_enabled());
        assert!(!cache.set("k", &json!(1), None).await);
        assert_eq!(cache.get::<serde_json::Value>("k").await, None);
    }
}
