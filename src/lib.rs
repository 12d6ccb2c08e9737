//! A small contact book service.
//!
//! Contacts (name, country code, phone) are uploaded through a JSON API,
//! deduplicated on `(country_code, phone)`, stored in SQLite, listed newest
//! first and exported as a vCard bundle.

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod phone;
pub mod services;
pub mod store;

pub use api::{router, AppState};
pub use config::Config;
pub use error::{ApiError, StoreError};
pub use store::{ContactStore, MemoryContactStore, SqliteContactStore};
