//! Error types for the contacts service.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

pub const PHONE_RULE_MESSAGE: &str =
    "Phone number must be 6-10 digits (without country code or leading zero)";

/// Failures raised by a [`ContactStore`](crate::store::ContactStore).
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Failed to prepare database location: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors surfaced by the upload and query services.
#[derive(Debug, Error)]
pub enum ApiError {
    /// User-correctable input problem.
    #[error("{0}")]
    Validation(String),

    /// The `(country_code, phone)` pair is already stored.
    #[error("{0}")]
    Conflict(String),

    #[error("Storage error: {0}")]
    Storage(#[from] StoreError),
}

impl ApiError {
    pub fn invalid_phone() -> Self {
        ApiError::Validation(PHONE_RULE_MESSAGE.to_string())
    }

    pub fn duplicate() -> Self {
        ApiError::Conflict("Contact already exists".to_string())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Bodies that are not valid JSON, or lack a field, are input errors like any other.
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Validation(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            ApiError::Storage(err) => {
                tracing::error!(error = %err, "storage failure");
                "Database error".to_string()
            }
            other => other.to_string(),
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}

/// Errors that can occur during configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {var}: {reason}")]
    InvalidValue { var: String, reason: String },
}

pub type ApiResult<T> = Result<T, ApiError>;

pub type StoreResult<T> = Result<T, StoreError>;

pub type ConfigResult<T> = Result<T, ConfigError>;
