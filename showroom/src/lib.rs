//! Core of the dealer marketplace backend: the best-effort response cache,
//! its invalidation hooks, and the dealer/document collaborators the HTTP
//! layer drives.

pub mod auth;
pub mod cache;
pub mod documents;
pub mod invalidation;
pub mod keys;
pub mod ports;
pub mod store_client;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use cache::Cache;
pub use invalidation::Invalidator;
pub use ports::KeyValueStore;
pub use store_client::StoreClient;
