use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A stored contact row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Contact {
    pub id: i64,
    pub name: String,
    pub phone: String,
    pub country_code: String,
    pub created_at: DateTime<Utc>,
}

/// A contact that passed validation and is ready to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewContact {
    pub name: String,
    pub phone: String,
    pub country_code: String,
    pub created_at: DateTime<Utc>,
}

/// Result of a conflict-suppressing insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    Inserted { id: i64 },
    /// The `(country_code, phone)` pair was already present; nothing was written.
    Duplicate,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UploadRequest {
    pub name: String,
    pub phone: String,
    pub country_code: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CheckContactRequest {
    pub phone: String,
    pub country_code: String,
}

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub success: bool,
}

#[derive(Debug, Serialize)]
pub struct CheckContactResponse {
    pub exists: bool,
}
