pub mod authentication;
pub mod authorization;
pub mod read_through;

pub use authentication::auth_middleware;
pub use authorization::require_owner;
pub use read_through::{CachedResponse, DEFAULT_TTL, ReadThroughLayer, X_CACHE};
