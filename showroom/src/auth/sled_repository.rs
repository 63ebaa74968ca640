use super::error::AuthError;
use super::models::Dealer;
use super::repository::DealerRepository;
use async_trait::async_trait;
use sled::Db;
use std::path::Path;

const DEALERS_TREE: &str = "dealers";
const DEALERS_BY_EMAIL_TREE: &str = "dealers_by_email";

#[derive(Clone)]
pub struct SledDealerRepository {
    db: Db,
}

impl SledDealerRepository {
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, AuthError> {
        let db = sled::open(path)?;
        Ok(Self { db })
    }

    /// Share an already opened database with other repositories.
    pub fn from_db(db: Db) -> Self {
        Self { db }
    }

    fn dealers_tree(&self) -> Result<sled::Tree, AuthError> {
        Ok(self.db.open_tree(DEALERS_TREE)?)
    }

    fn dealers_by_email_tree(&self) -> Result<sled::Tree, AuthError> {
        Ok(self.db.open_tree(DEALERS_BY_EMAIL_TREE)?)
    }
}

#[async_trait]
impl DealerRepository for SledDealerRepository {
    async fn create(&self, dealer: Dealer) -> Result<Dealer, AuthError> {
        if self.email_exists(&dealer.email).await? {
            return Err(AuthError::DealerAlreadyExists);
        }

        let dealer_json = serde_json::to_vec(&dealer)?;

        self.dealers_tree()?
            .insert(dealer.id.as_bytes(), dealer_json)?;
        self.dealers_by_email_tree()?
            .insert(dealer.email.as_bytes(), dealer.id.as_bytes())?;

        Ok(dealer)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Dealer>, AuthError> {
        let Some(dealer_id) = self.dealers_by_email_tree()?.get(email.as_bytes())? else {
            return Ok(None);
        };

        match self.dealers_tree()?.get(&dealer_id)? {
            Some(data) => Ok(Some(serde_json::from_slice(&data)?)),
            None => Ok(None),
        }
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Dealer>, AuthError> {
        match self.dealers_tree()?.get(id.as_bytes())? {
            Some(data) => Ok(Some(serde_json::from_slice(&data)?)),
            None => Ok(None),
        }
    }

    async fn list_all(&self) -> Result<Vec<Dealer>, AuthError> {
        let mut dealers = Vec::new();

        for item in self.dealers_tree()?.iter() {
            let (_, data) = item?;
            let dealer: Dealer = serde_json::from_slice(&data)?;
            dealers.push(dealer);
        }

        dealers.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(dealers)
    }

    async fn update(&self, dealer: Dealer) -> Result<Dealer, AuthError> {
        let dealers_tree = self.dealers_tree()?;

        if !dealers_tree.contains_key(dealer.id.as_bytes())? {
            return Err(AuthError::DealerNotFound);
        }

        let dealer_json = serde_json::to_vec(&dealer)?;
        dealers_tree.insert(dealer.id.as_bytes(), dealer_json)?;
        self.dealers_by_email_tree()?
            .insert(dealer.email.as_bytes(), dealer.id.as_bytes())?;

        Ok(dealer)
    }

    async fn email_exists(&self, email: &str) -> Result<bool, AuthError> {
        Ok(self.dealers_by_email_tree()?.contains_key(email.as_bytes())?)
    }
}
