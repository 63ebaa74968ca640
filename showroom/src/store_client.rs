use crate::ports::KeyValueStore;
use shared::TtlSecs;
use std::fmt::Debug;
use std::sync::Arc;
use tracing::{debug, warn};

/// Process-wide handle to the key-value store.
///
/// Built once at startup. When the store could not be reached the handle is
/// `disabled` and every operation reports a miss or `false`, so callers never
/// check for a missing connection themselves. Errors from a connected store are
/// logged and absorbed the same way.
#[derive(Clone)]
pub struct StoreClient {
    store: Option<Arc<dyn KeyValueStore>>,
}

impl StoreClient {
    pub fn connected(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store: Some(store) }
    }

    pub fn disabled() -> Self {
        Self { store: None }
    }

    pub fn is_enabled(&self) -> bool {
        self.store.is_some()
    }

    pub fn backend_name(&self) -> &'static str {
        self.store
            .as_ref()
            .map(|s| s.backend_name())
            .unwrap_or("disabled")
    }

    pub async fn get(&self, key: &str) -> Option<String> {
        let store = self.store.as_ref()?;
        match store.get(key).await {
            Ok(value) => value,
            Err(e) => {
                warn!(key = %key, error = %e, "Store get error");
                None
            }
        }
    }

    pub async fn set_with_expiry(&self, key: &str, value: String, ttl: TtlSecs) -> bool {
        let Some(store) = self.store.as_ref() else {
            return false;
        };
        match store.set_with_expiry(key, value, ttl).await {
            Ok(()) => true,
            Err(e) => {
                warn!(key = %key, ttl_secs = ttl.0, error = %e, "Store set error");
                false
            }
        }
    }

    pub async fn delete(&self, key: &str) -> bool {
        let Some(store) = self.store.as_ref() else {
            return false;
        };
        match store.delete(key).await {
            Ok(removed) => {
                debug!(key = %key, removed, "Store delete");
                true
            }
            Err(e) => {
                warn!(key = %key, error = %e, "Store delete error");
                false
            }
        }
    }

    pub async fn delete_by_pattern(&self, pattern: &str) -> bool {
        let Some(store) = self.store.as_ref() else {
            return false;
        };
        match store.delete_by_pattern(pattern).await {
            Ok(removed) => {
                debug!(pattern = %pattern, removed, "Store pattern delete");
                true
            }
            Err(e) => {
                warn!(pattern = %pattern, error = %e, "Store clear pattern error");
                false
            }
        }
    }
}

impl Debug for StoreClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreClient")
            .field("backend", &self.backend_name())
            .field("enabled", &self.is_enabled())
            .finish()
    }
}
