pub mod auth;
pub mod dealers;
pub mod health;
pub mod inventory;
pub mod leads;

pub use auth::{change_password, me, register, update_profile};
pub use dealers::{get_dealer, list_dealers};
pub use health::health_check;
pub use inventory::{
    create_document, delete_document, get_document, list_documents, search_posts,
    update_document,
};
pub use leads::{add_lead_note, create_lead, get_lead, lead_summary, list_leads, update_lead};
