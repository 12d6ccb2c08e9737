use super::ContactStore;
use crate::error::StoreResult;
use crate::models::{Contact, InsertOutcome, NewContact};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

/// Mutex-guarded, process-local store. Nothing survives a restart.
#[derive(Default)]
pub struct MemoryContactStore {
    inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    next_id: i64,
    rows: Vec<Contact>,
    by_key: HashMap<(String, String), i64>,
}

impl MemoryContactStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        // A panic mid-insert leaves the maps consistent, so poisoning is ignored.
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl ContactStore for MemoryContactStore {
    async fn insert(&self, contact: NewContact) -> StoreResult<InsertOutcome> {
        let mut inner = self.lock();
        let key = (contact.country_code.clone(), contact.phone.clone());
        if inner.by_key.contains_key(&key) {
            return Ok(InsertOutcome::Duplicate);
        }

        inner.next_id += 1;
        let id = inner.next_id;
        inner.by_key.insert(key, id);
        inner.rows.push(Contact {
            id,
            name: contact.name,
            phone: contact.phone,
            country_code: contact.country_code,
            created_at: contact.created_at,
        });
        Ok(InsertOutcome::Inserted { id })
    }

    async fn list_all(&self) -> StoreResult<Vec<Contact>> {
        let mut rows = self.lock().rows.clone();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(rows)
    }

    async fn exists(&self, country_code: &str, phone: &str) -> StoreResult<bool> {
        let key = (country_code.to_string(), phone.to_string());
        Ok(self.lock().by_key.contains_key(&key))
    }
}
