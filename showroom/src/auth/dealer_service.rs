use super::error::AuthError;
use super::models::{Dealer, ProfileUpdate, Registration};
use super::password::{hash_password, verify_password};
use super::repository::DealerRepository;
use chrono::Utc;
use std::sync::Arc;

const NAME_LEN: std::ops::RangeInclusive<usize> = 2..=100;
const MIN_PHONE_LEN: usize = 10;

pub struct DealerService {
    dealer_repo: Arc<dyn DealerRepository>,
}

impl DealerService {
    pub fn new(dealer_repo: Arc<dyn DealerRepository>) -> Self {
        Self { dealer_repo }
    }

    /// Register a new dealer account
    pub async fn register(&self, mut registration: Registration) -> Result<Dealer, AuthError> {
        registration.name = registration.name.trim().to_string();
        registration.phone = registration.phone.trim().to_string();
        registration.email = normalize_email(&registration.email);

        validate_name(&registration.name)?;
        validate_phone(&registration.phone)?;
        if !is_plausible_email(&registration.email) {
            return Err(AuthError::InvalidProfile(
                "Please provide a valid email".to_string(),
            ));
        }

        if self.dealer_repo.email_exists(&registration.email).await? {
            return Err(AuthError::DealerAlreadyExists);
        }

        let password_hash = hash_blocking(registration.password.clone()).await?;
        let dealer = Dealer::new(registration, password_hash);

        self.dealer_repo.create(dealer).await
    }

    /// Authenticate a dealer by email and password
    pub async fn authenticate(&self, email: &str, password: &str) -> Result<Dealer, AuthError> {
        let dealer = self
            .dealer_repo
            .find_by_email(&normalize_email(email))
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        if !verify_blocking(password.to_string(), dealer.password_hash.clone()).await? {
            return Err(AuthError::InvalidCredentials);
        }

        if !dealer.is_active() {
            return Err(AuthError::AccountInactive);
        }

        Ok(dealer)
    }

    pub async fn get_dealer(&self, id: &str) -> Result<Dealer, AuthError> {
        self.dealer_repo
            .find_by_id(id)
            .await?
            .ok_or(AuthError::DealerNotFound)
    }

    pub async fn list_dealers(&self) -> Result<Vec<Dealer>, AuthError> {
        self.dealer_repo.list_all().await
    }

    pub async fn update_profile(
        &self,
        dealer_id: &str,
        update: ProfileUpdate,
    ) -> Result<Dealer, AuthError> {
        if let Some(name) = update.name.as_deref().filter(|n| !n.is_empty()) {
            validate_name(name.trim())?;
        }
        if let Some(phone) = update.phone.as_deref().filter(|p| !p.is_empty()) {
            validate_phone(phone.trim())?;
        }

        let mut dealer = self.get_dealer(dealer_id).await?;
        dealer.apply(update);

        self.dealer_repo.update(dealer).await
    }

    /// Change a dealer's password after checking the current one
    pub async fn change_password(
        &self,
        dealer_id: &str,
        current_password: &str,
        new_password: &str,
    ) -> Result<Dealer, AuthError> {
        let mut dealer = self.get_dealer(dealer_id).await?;

        if !verify_blocking(current_password.to_string(), dealer.password_hash.clone()).await? {
            return Err(AuthError::InvalidCredentials);
        }

        dealer.password_hash = hash_blocking(new_password.to_string()).await?;
        dealer.updated_at = Utc::now();

        self.dealer_repo.update(dealer).await
    }
}

/// Argon2 runs on the blocking pool so request workers keep serving.
async fn hash_blocking(password: String) -> Result<String, AuthError> {
    tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(|e| AuthError::PasswordHashError(e.to_string()))?
}

async fn verify_blocking(password: String, hash: String) -> Result<bool, AuthError> {
    tokio::task::spawn_blocking(move || verify_password(&password, &hash))
        .await
        .map_err(|e| AuthError::PasswordHashError(e.to_string()))?
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

fn is_plausible_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => !local.is_empty() && domain.contains('.') && !domain.contains('@'),
        None => false,
    }
}

fn validate_name(name: &str) -> Result<(), AuthError> {
    if NAME_LEN.contains(&name.chars().count()) {
        Ok(())
    } else {
        Err(AuthError::InvalidProfile(
            "Name must be between 2 and 100 characters".to_string(),
        ))
    }
}

fn validate_phone(phone: &str) -> Result<(), AuthError> {
    if phone.chars().count() >= MIN_PHONE_LEN {
        Ok(())
    } else {
        Err(AuthError::InvalidProfile(
            "Phone number must be at least 10 characters".to_string(),
        ))
    }
}
