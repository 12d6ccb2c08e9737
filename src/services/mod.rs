//! Service layer between the HTTP handlers and the contact store.

mod query_service;
mod upload_service;

pub use query_service::{render_vcards, QueryService};
pub use upload_service::UploadService;
