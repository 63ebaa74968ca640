#![deny(clippy::all)]

use async_trait::async_trait;
use shared::{Result, TtlSecs};

// Ports are the pluggable extension points for the external key-value store

/// Raw string store behind the response cache (e.g. Redis).
///
/// Implementations report failures through `Result`; absorbing them is the
/// job of [`crate::StoreClient`].
#[async_trait]
pub trait KeyValueStore: Send + Sync + 'static {
    /// Read the raw value under `key`, `None` when absent or expired.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write `value` under `key` and set its expiry in a single round trip.
    async fn set_with_expiry(&self, key: &str, value: String, ttl: TtlSecs) -> Result<()>;

    /// Remove `key`; returns how many entries were removed.
    async fn delete(&self, key: &str) -> Result<u64>;

    /// Enumerate keys matching the glob `pattern`, then remove them in one batch.
    async fn delete_by_pattern(&self, pattern: &str) -> Result<u64>;

    fn backend_name(&self) -> &'static str;
}
