use super::models::{Collection, Document};
use async_trait::async_trait;
use serde_json::{Map, Value};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<sled::Error> for RepositoryError {
    fn from(err: sled::Error) -> Self {
        RepositoryError::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for RepositoryError {
    fn from(err: serde_json::Error) -> Self {
        RepositoryError::Serialization(err.to_string())
    }
}

/// Document store scoped by collection and owning dealer.
#[async_trait]
pub trait DocumentRepository: Send + Sync {
    async fn insert(
        &self,
        collection: Collection,
        dealer_id: &str,
        fields: Map<String, Value>,
    ) -> Result<Document, RepositoryError>;

    async fn find(
        &self,
        collection: Collection,
        dealer_id: &str,
        id: &str,
    ) -> Result<Option<Document>, RepositoryError>;

    /// All of a dealer's documents, newest first.
    async fn list(
        &self,
        collection: Collection,
        dealer_id: &str,
    ) -> Result<Vec<Document>, RepositoryError>;

    /// Merge `fields` into an existing document; `None` when it does not exist.
    async fn update(
        &self,
        collection: Collection,
        dealer_id: &str,
        id: &str,
        fields: Map<String, Value>,
    ) -> Result<Option<Document>, RepositoryError>;

    /// Returns whether a document was removed.
    async fn delete(
        &self,
        collection: Collection,
        dealer_id: &str,
        id: &str,
    ) -> Result<bool, RepositoryError>;
}
