use super::models::{Collection, Document};
use super::repository::{DocumentRepository, RepositoryError};
use async_trait::async_trait;
use serde_json::{Map, Value};
use sled::Db;
use std::path::Path;

/// One sled tree per collection, keyed by `{dealer_id}/{document_id}` so a
/// dealer's documents are a prefix scan.
#[derive(Clone)]
pub struct SledDocumentRepository {
    db: Db,
}

impl SledDocumentRepository {
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, RepositoryError> {
        let db = sled::open(path)?;
        Ok(Self { db })
    }

    pub fn from_db(db: Db) -> Self {
        Self { db }
    }

    fn tree(&self, collection: Collection) -> Result<sled::Tree, RepositoryError> {
        Ok(self.db.open_tree(collection.as_str())?)
    }

    fn key(dealer_id: &str, id: &str) -> String {
        format!("{dealer_id}/{id}")
    }
}

#[async_trait]
impl DocumentRepository for SledDocumentRepository {
    async fn insert(
        &self,
        collection: Collection,
        dealer_id: &str,
        fields: Map<String, Value>,
    ) -> Result<Document, RepositoryError> {
        let document = Document::new(dealer_id, fields);
        let json = serde_json::to_vec(&document)?;

        self.tree(collection)?
            .insert(Self::key(dealer_id, &document.id).as_bytes(), json)?;

        Ok(document)
    }

    async fn find(
        &self,
        collection: Collection,
        dealer_id: &str,
        id: &str,
    ) -> Result<Option<Document>, RepositoryError> {
        match self.tree(collection)?.get(Self::key(dealer_id, id).as_bytes())? {
            Some(data) => Ok(Some(serde_json::from_slice(&data)?)),
            None => Ok(None),
        }
    }

    async fn list(
        &self,
        collection: Collection,
        dealer_id: &str,
    ) -> Result<Vec<Document>, RepositoryError> {
        let prefix = format!("{dealer_id}/");
        let mut documents = Vec::new();

        for item in self.tree(collection)?.scan_prefix(prefix.as_bytes()) {
            let (_, data) = item?;
            let document: Document = serde_json::from_slice(&data)?;
            documents.push(document);
        }

        documents.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(documents)
    }

    async fn update(
        &self,
        collection: Collection,
        dealer_id: &str,
        id: &str,
        fields: Map<String, Value>,
    ) -> Result<Option<Document>, RepositoryError> {
        let tree = self.tree(collection)?;
        let key = Self::key(dealer_id, id);

        let Some(data) = tree.get(key.as_bytes())? else {
            return Ok(None);
        };

        let mut document: Document = serde_json::from_slice(&data)?;
        document.merge(fields);
        tree.insert(key.as_bytes(), serde_json::to_vec(&document)?)?;

        Ok(Some(document))
    }

    async fn delete(
        &self,
        collection: Collection,
        dealer_id: &str,
        id: &str,
    ) -> Result<bool, RepositoryError> {
        Ok(self
            .tree(collection)?
            .remove(Self::key(dealer_id, id).as_bytes())?
            .is_some())
    }
}
