//! Upload endpoint handlers.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::{header, HeaderMap, StatusCode},
    Json,
};
use bytes::Bytes;
use imagegate_core::StoredFile;
use serde::{Deserialize, Serialize};

use crate::error::HttpAppError;
use crate::services::UploadService;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct UploadQuery {
    /// Opaque API key; resolved against the key registry.
    key: Option<String>,
}

/// Stored-file section of a success response.
#[derive(Debug, Serialize)]
pub struct UploadedFileBody {
    pub name: String,
    pub size: u64,
    #[serde(rename = "type")]
    pub content_type: String,
    pub path: String,
    #[serde(rename = "downloadUrl")]
    pub download_url: String,
}

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub success: bool,
    pub file: UploadedFileBody,
    pub message: String,
}

impl From<StoredFile> for UploadResponse {
    fn from(stored: StoredFile) -> Self {
        Self {
            success: true,
            file: UploadedFileBody {
                name: stored.name,
                size: stored.size,
                content_type: stored.content_type,
                path: stored.storage_key,
                download_url: stored.download_url,
            },
            message: "File uploaded successfully".to_string(),
        }
    }
}

/// Liveness probe - process is running. Mirrored on both upload routes.
pub async fn liveness() -> StatusCode {
    StatusCode::OK
}

/// Upload handler
///
/// Accepts a raw image body, authorizes the `key` query parameter against
/// the registry, persists the body under the tenant's storage key, and
/// returns a time-limited download URL.
pub async fn upload(
    State(state): State<Arc<AppState>>,
    Query(query): Query<UploadQuery>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<UploadResponse>, HttpAppError> {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok());
    let content_disposition = headers
        .get(header::CONTENT_DISPOSITION)
        .and_then(|v| v.to_str().ok());

    let service = UploadService::new(&state);
    let stored = service
        .handle(query.key.as_deref(), content_type, content_disposition, body)
        .await?;

    Ok(Json(UploadResponse::from(stored)))
}
