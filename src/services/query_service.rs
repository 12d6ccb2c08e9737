//! Read-only projections of the contact store.

use crate::error::ApiResult;
use crate::models::Contact;
use crate::store::ContactStore;
use std::sync::Arc;

#[derive(Clone)]
pub struct QueryService {
    store: Arc<dyn ContactStore>,
}

impl QueryService {
    pub fn new(store: Arc<dyn ContactStore>) -> Self {
        Self { store }
    }

    /// Every contact, newest first.
    pub async fn list_all(&self) -> ApiResult<Vec<Contact>> {
        Ok(self.store.list_all().await?)
    }

    /// All contacts as vCard 3.0 records.
    pub async fn export_vcard(&self) -> ApiResult<String> {
        let contacts = self.store.list_all().await?;
        Ok(render_vcards(&contacts))
    }
}

/// One `BEGIN:VCARD`..`END:VCARD` block per contact, joined by `\n`.
pub fn render_vcards(contacts: &[Contact]) -> String {
    contacts
        .iter()
        .map(|contact| {
            format!(
                "BEGIN:VCARD\nVERSION:3.0\nFN:{}\nTEL:{}{}\nEND:VCARD",
                contact.name, contact.country_code, contact.phone
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
