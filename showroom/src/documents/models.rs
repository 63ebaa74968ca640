use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use uuid::Uuid;

/// Dealer-owned document collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Collection {
    Vehicles,
    Accessories,
    Posts,
    Leads,
}

impl Collection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Collection::Vehicles => "vehicles",
            Collection::Accessories => "accessories",
            Collection::Posts => "posts",
            Collection::Leads => "leads",
        }
    }

    /// Singular label used in error messages.
    pub fn item_label(&self) -> &'static str {
        match self {
            Collection::Vehicles => "Vehicle",
            Collection::Accessories => "Accessory",
            Collection::Posts => "Post",
            Collection::Leads => "Lead",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fields managed by the repository; never taken from client input.
const RESERVED_FIELDS: [&str; 4] = ["id", "dealer_id", "created_at", "updated_at"];

/// A free-form JSON record owned by one dealer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Document {
    pub id: String,
    pub dealer_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Document {
    pub fn new(dealer_id: impl Into<String>, fields: Map<String, Value>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            dealer_id: dealer_id.into(),
            created_at: now,
            updated_at: now,
            fields: strip_reserved(fields),
        }
    }

    /// Shallow merge: top-level keys in `fields` replace existing ones.
    pub fn merge(&mut self, fields: Map<String, Value>) {
        for (key, value) in strip_reserved(fields) {
            self.fields.insert(key, value);
        }
        self.updated_at = Utc::now();
    }

    pub fn field_str(&self, name: &str) -> Option<&str> {
        self.fields.get(name).and_then(Value::as_str)
    }
}

fn strip_reserved(mut fields: Map<String, Value>) -> Map<String, Value> {
    for name in RESERVED_FIELDS {
        fields.remove(name);
    }
    fields
}

/// Page request parsed from `page` / `limit` query parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: usize,
    pub limit: usize,
}

impl PageRequest {
    pub const DEFAULT_LIMIT: usize = 10;
    pub const MAX_LIMIT: usize = 100;

    /// Clamp raw values: page starts at 1, limit stays within 1..=MAX_LIMIT.
    pub fn new(page: Option<usize>, limit: Option<usize>) -> Self {
        Self {
            page: page.unwrap_or(1).max(1),
            limit: limit
                .unwrap_or(Self::DEFAULT_LIMIT)
                .clamp(1, Self::MAX_LIMIT),
        }
    }

    /// Items to skip before this page. Saturates for absurd page numbers.
    pub fn offset(&self) -> usize {
        (self.page - 1).saturating_mul(self.limit)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(None, None)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Pagination {
    pub current: usize,
    /// Number of pages.
    pub total: usize,
    pub count: usize,
    #[serde(rename = "totalItems")]
    pub total_items: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Page<T = Document> {
    pub items: Vec<T>,
    pub pagination: Pagination,
}

impl<T> Page<T> {
    /// Slice an already ordered result set.
    pub fn from_items(all: Vec<T>, request: PageRequest) -> Self {
        let total_items = all.len();
        let items: Vec<T> = all
            .into_iter()
            .skip(request.offset())
            .take(request.limit)
            .collect();

        Self {
            pagination: Pagination {
                current: request.page,
                total: total_items.div_ceil(request.limit),
                count: items.len(),
                total_items,
            },
            items,
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            pagination: self.pagination,
        }
    }
}
