use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use showroom::auth::{Dealer, DealerStatus};
use showroom::documents::{Collection, Page, Pagination};
use std::collections::BTreeMap;

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub cache: String,
}

/// Public view of a dealer; never carries the password hash.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DealerResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: Option<String>,
    pub description: Option<String>,
    pub website: Option<String>,
    pub logo: Option<String>,
    pub status: DealerStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Dealer> for DealerResponse {
    fn from(dealer: Dealer) -> Self {
        Self {
            id: dealer.id,
            name: dealer.name,
            email: dealer.email,
            phone: dealer.phone,
            address: dealer.address,
            description: dealer.description,
            website: dealer.website,
            logo: dealer.logo,
            status: dealer.status,
            created_at: dealer.created_at,
            updated_at: dealer.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DealerListResponse {
    pub dealers: Vec<DealerResponse>,
    pub pagination: Pagination,
}

impl From<Page<DealerResponse>> for DealerListResponse {
    fn from(page: Page<DealerResponse>) -> Self {
        Self {
            dealers: page.items,
            pagination: page.pagination,
        }
    }
}

/// `{ "<collection>": [...], "pagination": {...} }`
pub fn collection_page(collection: Collection, page: Page) -> Value {
    let mut body = Map::new();
    body.insert(
        collection.as_str().to_string(),
        serde_json::to_value(page.items).unwrap_or_default(),
    );
    body.insert(
        "pagination".to_string(),
        serde_json::to_value(page.pagination).unwrap_or_default(),
    );
    Value::Object(body)
}

#[derive(Debug, Serialize)]
pub struct LeadSummaryResponse {
    pub total: usize,
    #[serde(rename = "byStatus")]
    pub by_status: BTreeMap<String, usize>,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
