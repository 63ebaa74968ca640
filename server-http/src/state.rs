use showroom::auth::{DealerService, SledDealerRepository};
use showroom::documents::{DocumentRepository, SledDocumentRepository};
use showroom::{Cache, Invalidator, StoreClient};
use std::sync::Arc;

/// Server state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub cache: Cache,
    pub invalidator: Invalidator,
    pub dealer_service: Arc<DealerService>,
    pub documents: Arc<dyn DocumentRepository>,
}

impl AppState {
    pub fn new(
        store: StoreClient,
        dealer_service: Arc<DealerService>,
        documents: Arc<dyn DocumentRepository>,
    ) -> Self {
        let cache = Cache::new(store);
        Self {
            invalidator: Invalidator::new(cache.clone()),
            cache,
            dealer_service,
            documents,
        }
    }

    /// Dealers and documents share one sled database.
    pub fn from_db(store: StoreClient, db: sled::Db) -> Self {
        let dealers = Arc::new(SledDealerRepository::from_db(db.clone()));
        let documents = Arc::new(SledDocumentRepository::from_db(db));
        Self::new(store, Arc::new(DealerService::new(dealers)), documents)
    }
}
