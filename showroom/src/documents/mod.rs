pub mod filter;
pub mod models;
pub mod repository;
pub mod sled_repository;

pub use filter::Filter;
pub use models::{Collection, Document, Page, PageRequest, Pagination};
pub use repository::{DocumentRepository, RepositoryError};
pub use sled_repository::SledDocumentRepository;
