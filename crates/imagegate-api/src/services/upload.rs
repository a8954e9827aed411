//! Upload orchestration.
//!
//! The only component with side effects. One upload runs the stages in
//! strict sequence - validate, authorize, resolve, store, sign - and each
//! stage short-circuits on failure with its own outcome. No retries
//! anywhere: a transient failure is surfaced immediately as the terminal
//! outcome for that request.

use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use chrono::Utc;
use imagegate_core::constants::UPLOAD_SOURCE_TAG;
use imagegate_core::{validate_upload_headers, AppError, StoredFile};
use imagegate_registry::{AuthOutcome, KeyRegistry};
use imagegate_storage::{resolve_storage_key, ObjectMetadata, Storage};

use crate::audit::{append_detached, AuditSink, UploadAuditRecord};
use crate::error::storage_error_to_app;
use crate::state::AppState;

pub struct UploadService {
    registry: KeyRegistry,
    storage: Arc<dyn Storage>,
    audit: Arc<dyn AuditSink>,
    url_ttl: Duration,
}

impl UploadService {
    pub fn new(state: &AppState) -> Self {
        Self {
            registry: state.registry.clone(),
            storage: state.storage.clone(),
            audit: state.audit.clone(),
            url_ttl: state.config.download_url_ttl,
        }
    }

    /// Run one upload through the pipeline.
    #[tracing::instrument(skip(self, api_key, body), fields(operation = "upload"))]
    pub async fn handle(
        &self,
        api_key: Option<&str>,
        content_type: Option<&str>,
        content_disposition: Option<&str>,
        body: Bytes,
    ) -> Result<StoredFile, AppError> {
        let validated = validate_upload_headers(content_type, content_disposition)?;

        let (application_id, path) = match self.registry.authorize(api_key).await {
            AuthOutcome::Authorized {
                application_id,
                path,
            } => (application_id, path),
            AuthOutcome::Denied(reason) => {
                tracing::debug!(reason = %reason, "API key refused");
                return Err(AppError::Unauthorized(reason.to_string()));
            }
        };

        let storage_key =
            resolve_storage_key(&application_id, path.as_deref(), &validated.filename)
                .map_err(storage_error_to_app)?;

        let size_bytes = body.len() as u64;
        let metadata = ObjectMetadata {
            original_filename: validated.filename.clone(),
            size_bytes,
            uploaded_at: Utc::now(),
            upload_source: UPLOAD_SOURCE_TAG.to_string(),
        };

        self.storage
            .put(&storage_key, body, &validated.content_type, &metadata)
            .await
            .map_err(storage_error_to_app)?;

        let download_url = match self
            .storage
            .presigned_download_url(&storage_key, self.url_ttl)
            .await
        {
            Ok(url) => url,
            Err(e) => {
                // The object is already persisted; the request still fails.
                tracing::warn!(
                    error = %e,
                    key = %storage_key,
                    "Download URL signing failed after successful write; stored object remains"
                );
                return Err(storage_error_to_app(e));
            }
        };

        tracing::info!(
            application_id = %application_id,
            key = %storage_key,
            size_bytes = size_bytes,
            "Upload stored"
        );

        let record = UploadAuditRecord::new(
            application_id,
            validated.filename.clone(),
            storage_key.clone(),
            size_bytes,
            validated.content_type.clone(),
            api_key.unwrap_or_default().to_string(),
        );
        append_detached(self.audit.clone(), record);

        Ok(StoredFile {
            name: validated.filename,
            size: size_bytes,
            content_type: validated.content_type,
            storage_key,
            download_url,
        })
    }
}
