use crate::cache::Cache;
use crate::keys;
use tracing::info;

/// Invalidation hooks called by mutating handlers after a successful write.
///
/// Results are advisory: a `false` only means some stale entry may survive
/// until its TTL runs out.
#[derive(Clone, Debug)]
pub struct Invalidator {
    cache: Cache,
}

impl Invalidator {
    pub fn new(cache: Cache) -> Self {
        Self { cache }
    }

    pub async fn delete_cache(&self, key: &str) -> bool {
        self.cache.delete(key).await
    }

    pub async fn clear_cache_pattern(&self, pattern: &str) -> bool {
        self.cache.delete_pattern(pattern).await
    }

    /// Profile fields changed: drop the cached profile and every directory
    /// response that embeds the dealer record.
    pub async fn profile_changed(&self, dealer_id: &str) -> bool {
        info!(dealer_id = %dealer_id, "Invalidating dealer profile entries");
        let profile = self.delete_cache(&keys::profile(dealer_id)).await;
        let dealer = self.delete_cache(&keys::dealer(dealer_id)).await;
        let directory = self.delete_cache(&keys::dealer_directory()).await;
        let queries = self
            .clear_cache_pattern(&keys::dealer_directory_queries())
            .await;
        profile && dealer && directory && queries
    }

    /// Password hashes never reach public responses, so only the profile
    /// entry is dropped.
    pub async fn password_changed(&self, dealer_id: &str) -> bool {
        info!(dealer_id = %dealer_id, "Invalidating dealer profile after password change");
        self.delete_cache(&keys::profile(dealer_id)).await
    }

    pub async fn collection_changed(&self, dealer_id: &str, collection: &str) -> bool {
        info!(dealer_id = %dealer_id, collection = %collection, "Invalidating collection entries");
        self.clear_cache_pattern(&keys::collection_pattern(dealer_id, collection))
            .await
    }
}
