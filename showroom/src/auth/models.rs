use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum DealerStatus {
    #[default]
    Active,
    Inactive,
    Suspended,
}

/// A dealer account as persisted by the repository.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dealer {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub password_hash: String,
    pub address: Option<String>,
    pub description: Option<String>,
    pub website: Option<String>,
    pub logo: Option<String>,
    #[serde(default)]
    pub status: DealerStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Dealer {
    pub fn new(registration: Registration, password_hash: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            name: registration.name,
            email: registration.email,
            phone: registration.phone,
            password_hash,
            address: registration.address,
            description: registration.description,
            website: registration.website,
            logo: None,
            status: DealerStatus::Active,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == DealerStatus::Active
    }

    /// Apply the non-empty fields of `update`.
    pub fn apply(&mut self, update: ProfileUpdate) {
        fn set(target: &mut String, value: Option<String>) {
            if let Some(v) = value.filter(|v| !v.is_empty()) {
                *target = v;
            }
        }
        fn set_opt(target: &mut Option<String>, value: Option<String>) {
            if let Some(v) = value.filter(|v| !v.is_empty()) {
                *target = Some(v);
            }
        }

        set(&mut self.name, update.name);
        set(&mut self.phone, update.phone);
        set_opt(&mut self.address, update.address);
        set_opt(&mut self.description, update.description);
        set_opt(&mut self.website, update.website);
        set_opt(&mut self.logo, update.logo);
        self.updated_at = Utc::now();
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: String,
    pub phone: String,
    pub address: Option<String>,
    pub description: Option<String>,
    pub website: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub description: Option<String>,
    pub website: Option<String>,
    pub logo: Option<String>,
}
