use super::error::AuthError;
use super::models::Dealer;
use async_trait::async_trait;

#[async_trait]
pub trait DealerRepository: Send + Sync {
    /// Create a new dealer
    async fn create(&self, dealer: Dealer) -> Result<Dealer, AuthError>;

    /// Find a dealer by (normalized) email
    async fn find_by_email(&self, email: &str) -> Result<Option<Dealer>, AuthError>;

    async fn find_by_id(&self, id: &str) -> Result<Option<Dealer>, AuthError>;

    async fn list_all(&self) -> Result<Vec<Dealer>, AuthError>;

    /// Replace a stored dealer
    async fn update(&self, dealer: Dealer) -> Result<Dealer, AuthError>;

    async fn email_exists(&self, email: &str) -> Result<bool, AuthError>;
}
