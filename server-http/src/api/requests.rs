use serde::Deserialize;
use showroom::documents::Filter;

#[derive(Debug, Deserialize)]
pub struct ChangePasswordRequest {
    #[serde(rename = "currentPassword", alias = "current_password")]
    pub current_password: String,
    #[serde(rename = "newPassword", alias = "new_password")]
    pub new_password: String,
}

/// `?page=&limit=` on list endpoints
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<usize>,
    pub limit: Option<usize>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    pub text: Option<String>,
    pub page: Option<usize>,
    pub limit: Option<usize>,
}

/// Filters shared by the vehicle, accessory and post lists. Parameters that
/// a collection's documents never carry simply match nothing.
#[derive(Debug, Default, Deserialize)]
pub struct InventoryQuery {
    pub page: Option<usize>,
    pub limit: Option<usize>,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub year: Option<String>,
    pub category: Option<String>,
    pub status: Option<String>,
    pub condition: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub featured: Option<bool>,
    #[serde(rename = "minPrice", alias = "min_price")]
    pub min_price: Option<f64>,
    #[serde(rename = "maxPrice", alias = "max_price")]
    pub max_price: Option<f64>,
}

impl InventoryQuery {
    pub fn filter(&self) -> Filter {
        let featured = self.featured.map(|f| f.to_string());
        Filter::new()
            .contains("brand", self.brand.as_deref())
            .contains("model", self.model.as_deref())
            .equals("year", self.year.as_deref())
            .equals("category", self.category.as_deref())
            .equals("status", self.status.as_deref())
            .equals("condition", self.condition.as_deref())
            .equals("type", self.kind.as_deref())
            .equals("featured", featured.as_deref())
            .range("price", self.min_price, self.max_price)
    }
}

/// `?status=&inquiry=&priority=` filters on the lead list
#[derive(Debug, Default, Deserialize)]
pub struct LeadQuery {
    pub status: Option<String>,
    pub inquiry: Option<String>,
    pub priority: Option<String>,
    pub page: Option<usize>,
    pub limit: Option<usize>,
}

impl LeadQuery {
    pub fn filter(&self) -> Filter {
        Filter::new()
            .equals("status", self.status.as_deref())
            .equals("inquiry", self.inquiry.as_deref())
            .equals("priority", self.priority.as_deref())
    }
}

#[derive(Debug, Deserialize)]
pub struct LeadNoteRequest {
    pub content: Option<String>,
    pub author: Option<String>,
}
