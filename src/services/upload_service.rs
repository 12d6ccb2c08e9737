//! Contact upload and the advisory existence check.

use crate::error::{ApiError, ApiResult};
use crate::models::{CheckContactRequest, InsertOutcome, NewContact, UploadRequest};
use crate::phone::normalize_phone;
use crate::store::ContactStore;
use chrono::Utc;
use std::sync::Arc;

#[derive(Clone)]
pub struct UploadService {
    store: Arc<dyn ContactStore>,
}

impl UploadService {
    pub fn new(store: Arc<dyn ContactStore>) -> Self {
        Self { store }
    }

    /// Validate, normalize and store a contact. Returns the new row id.
    ///
    /// # Errors
    ///
    /// - `ApiError::Validation` for an empty name or country code, control
    ///   characters in either, or a phone that is not 6-10 digits after
    ///   normalization
    /// - `ApiError::Conflict` when `(country_code, phone)` is already stored
    /// - `ApiError::Storage` when the store fails
    pub async fn upload(&self, request: UploadRequest) -> ApiResult<i64> {
        let name = request.name.trim();
        if name.is_empty() {
            return Err(ApiError::Validation("Name is required".to_string()));
        }
        let country_code = request.country_code.trim();
        if country_code.is_empty() {
            return Err(ApiError::Validation("Country code is required".to_string()));
        }
        if name.chars().any(char::is_control) || country_code.chars().any(char::is_control) {
            return Err(ApiError::Validation(
                "Name and country code must be a single line".to_string(),
            ));
        }
        let phone = normalize_phone(&request.phone)?;

        let contact = NewContact {
            name: name.to_string(),
            phone,
            country_code: country_code.to_string(),
            created_at: Utc::now(),
        };

        match self.store.insert(contact).await? {
            InsertOutcome::Inserted { id } => {
                tracing::info!(id, country_code, "contact stored");
                Ok(id)
            }
            InsertOutcome::Duplicate => {
                tracing::info!(country_code, "duplicate contact rejected");
                Err(ApiError::duplicate())
            }
        }
    }

    /// Advisory pre-check used by the form before submitting.
    ///
    /// Racy by nature; `upload` alone enforces uniqueness. A phone that cannot
    /// be normalized can never have been stored, so it reports `false`.
    pub async fn exists(&self, request: CheckContactRequest) -> ApiResult<bool> {
        let Ok(phone) = normalize_phone(&request.phone) else {
            return Ok(false);
        };
        Ok(self
            .store
            .exists(request.country_code.trim(), &phone)
            .await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryContactStore;

    fn service() -> (UploadService, Arc<MemoryContactStore>) {
        let store = Arc::new(MemoryContactStore::new());
        (UploadService::new(store.clone()), store)
    }

    fn request(name: &str, phone: &str, country_code: &str) -> UploadRequest {
        UploadRequest {
            name: name.to_string(),
            phone: phone.to_string(),
            country_code: country_code.to_string(),
        }
    }

    #[tokio::test]
    async fn test_upload_normalizes_phone() {
        let (service, store) = service();
        service.upload(request("Alice", "0123456", "+1")).await.unwrap();

        let all = store.list_all().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].phone, "123456");
        assert_eq!(all[0].name, "Alice");
    }

    #[tokio::test]
    async fn test_short_phone_is_rejected_without_write() {
        let (service, store) = service();
        let err = service.upload(request("Bob", "12", "+1")).await.unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
        assert!(store.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_second_upload_conflicts() {
        let (service, store) = service();
        service.upload(request("Carol", "5551234", "+1")).await.unwrap();
        let err = service
            .upload(request("Carol again", "555-1234", "+1"))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Conflict(_)));

        let matching = store
            .list_all()
            .await
            .unwrap()
            .into_iter()
            .filter(|c| c.country_code == "+1" && c.phone == "5551234")
            .count();
        assert_eq!(matching, 1);
    }

    #[tokio::test]
    async fn test_blank_name_is_rejected() {
        let (service, _) = service();
        let err = service.upload(request("   ", "5551234", "+1")).await.unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
    }

    #[tokio::test]
    async fn test_line_breaks_are_rejected() {
        let (service, store) = service();
        let err = service
            .upload(request("Eve\nTEL:+19999999", "5551234", "+1"))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));

        let err = service
            .upload(request("Eve", "5551234", "+1\r\nNOTE:x"))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
        assert!(store.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_exists_is_advisory() {
        let (service, _) = service();
        let check = |phone: &str| CheckContactRequest {
            phone: phone.to_string(),
            country_code: "+1".to_string(),
        };

        assert!(!service.exists(check("5551234")).await.unwrap());
        service.upload(request("Dan", "5551234", "+1")).await.unwrap();
        assert!(service.exists(check("5551234")).await.unwrap());
        assert!(service.exists(check("0555 1234")).await.unwrap());
        assert!(!service.exists(check("12")).await.unwrap());
    }
}
