pub mod moka_store;
pub mod redis_store;

pub use moka_store::MokaStore;
pub use redis_store::RedisStore;

use shared::config::CacheBackend;
use showroom::StoreClient;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;

/// Upper bound on the initial Redis handshake before the cache is disabled
pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Build the store client for the configured backend.
///
/// Never fails: when Redis cannot be reached the service keeps running with
/// caching disabled and every request goes straight to its handler.
pub async fn connect_store(backend: &CacheBackend, max_entries: Option<u64>) -> StoreClient {
    match backend {
        CacheBackend::Redis(url) => match timeout(CONNECT_TIMEOUT, RedisStore::connect(url)).await {
            Ok(Ok(store)) => {
                tracing::info!("Connected to Redis cache");
                StoreClient::connected(Arc::new(store))
            }
            Ok(Err(e)) => {
                tracing::warn!(error = %e, "Redis connection error. Running without cache.");
                StoreClient::disabled()
            }
            Err(_) => {
                tracing::warn!(
                    timeout_secs = CONNECT_TIMEOUT.as_secs(),
                    "Redis connection timed out. Running without cache."
                );
                StoreClient::disabled()
            }
        },
        CacheBackend::Memory => {
            tracing::info!(max_entries = ?max_entries, "Using in-process cache");
            StoreClient::connected(Arc::new(MokaStore::new("showroom-cache", max_entries)))
        }
        CacheBackend::Disabled => {
            tracing::info!("Caching disabled by configuration");
            StoreClient::disabled()
        }
    }
}
