//! Persistence for contacts.

mod memory;
mod sqlite;

pub use memory::MemoryContactStore;
pub use sqlite::SqliteContactStore;

use crate::error::StoreResult;
use crate::models::{Contact, InsertOutcome, NewContact};
use async_trait::async_trait;

/// Durable contact storage.
///
/// Implementations must make `insert` atomic with respect to the
/// `(country_code, phone)` uniqueness constraint, and report a duplicate as
/// [`InsertOutcome::Duplicate`] rather than as an error.
#[async_trait]
pub trait ContactStore: Send + Sync {
    async fn insert(&self, contact: NewContact) -> StoreResult<InsertOutcome>;

    /// All contacts, newest `created_at` first.
    async fn list_all(&self) -> StoreResult<Vec<Contact>>;

    async fn exists(&self, country_code: &str, phone: &str) -> StoreResult<bool>;
}
