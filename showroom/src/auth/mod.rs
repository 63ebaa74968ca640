// Public API
pub mod dealer_service;
pub mod error;
pub mod models;
pub mod password;
pub mod repository;
pub mod sled_repository;

// Re-export commonly used types
pub use dealer_service::DealerService;
pub use error::AuthError;
pub use models::{Dealer, DealerStatus, ProfileUpdate, Registration};
pub use repository::DealerRepository;
pub use sled_repository::SledDealerRepository;
