//! HTTP surface: JSON endpoints, the vCard download, and the static front end.

use crate::error::ApiResult;
use crate::models::{
    CheckContactRequest, CheckContactResponse, Contact, UploadRequest, UploadResponse,
};
use crate::services::{QueryService, UploadService};
use crate::store::ContactStore;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::header,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use std::path::Path;
use std::sync::Arc;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

pub const VCARD_FILENAME: &str = "pk_tech_Contacts.vcf";

#[derive(Clone)]
pub struct AppState {
    pub upload: UploadService,
    pub query: QueryService,
}

impl AppState {
    pub fn new(store: Arc<dyn ContactStore>) -> Self {
        Self {
            upload: UploadService::new(store.clone()),
            query: QueryService::new(store),
        }
    }
}

/// Build the application router. Any path not matched by an endpoint is
/// looked up in `public_dir`, falling back to its `index.html`.
pub fn router(state: AppState, public_dir: impl AsRef<Path>) -> Router {
    let public_dir = public_dir.as_ref();
    let static_files =
        ServeDir::new(public_dir).fallback(ServeFile::new(public_dir.join("index.html")));

    Router::new()
        .route("/upload", post(upload_contact))
        .route("/check-contact", post(check_contact))
        .route("/contacts", get(list_contacts))
        .route("/download", get(download_vcard))
        .fallback_service(static_files)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

async fn upload_contact(
    State(state): State<AppState>,
    payload: Result<Json<UploadRequest>, JsonRejection>,
) -> ApiResult<Json<UploadResponse>> {
    let Json(payload) = payload?;
    state.upload.upload(payload).await?;
    Ok(Json(UploadResponse { success: true }))
}

async fn check_contact(
    State(state): State<AppState>,
    payload: Result<Json<CheckContactRequest>, JsonRejection>,
) -> ApiResult<Json<CheckContactResponse>> {
    let Json(payload) = payload?;
    let exists = state.upload.exists(payload).await?;
    Ok(Json(CheckContactResponse { exists }))
}

async fn list_contacts(State(state): State<AppState>) -> ApiResult<Json<Vec<Contact>>> {
    Ok(Json(state.query.list_all().await?))
}

async fn download_vcard(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let body = state.query.export_vcard().await?;
    let disposition = format!("attachment; filename=\"{VCARD_FILENAME}\"");
    Ok((
        [
            (header::CONTENT_TYPE, "text/vcard".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        body,
    ))
}
