//! Upload audit logging
//!
//! Every successful upload may append one audit record. The sink is
//! best-effort and decoupled from the response: the orchestrator dispatches
//! the append on a detached task after the outcome is already determined,
//! and an append failure is logged and swallowed.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

/// One completed upload, as recorded for auditing.
#[derive(Debug, Clone, Serialize)]
pub struct UploadAuditRecord {
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub application_id: String,
    pub filename: String,
    pub storage_key: String,
    pub size_bytes: u64,
    pub content_type: String,
    pub api_key: String,
}

impl UploadAuditRecord {
    pub fn new(
        application_id: String,
        filename: String,
        storage_key: String,
        size_bytes: u64,
        content_type: String,
        api_key: String,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            application_id,
            filename,
            storage_key,
            size_bytes,
            content_type,
            api_key,
        }
    }
}

#[derive(Debug, Error)]
pub enum AuditError {
    #[error("Append failed: {0}")]
    AppendFailed(String),
}

/// Append-only audit sink.
#[async_trait]
pub trait AuditSink: Send + Sync {
    async fn append(&self, record: UploadAuditRecord) -> Result<(), AuditError>;
}

/// Default sink: structured event under the `audit` tracing target, for easy
/// filtering by log aggregation systems.
#[derive(Debug, Clone, Default)]
pub struct TracingAuditSink;

#[async_trait]
impl AuditSink for TracingAuditSink {
    async fn append(&self, record: UploadAuditRecord) -> Result<(), AuditError> {
        let json = serde_json::to_string(&record)
            .map_err(|e| AuditError::AppendFailed(e.to_string()))?;

        tracing::event!(
            target: "audit",
            tracing::Level::INFO,
            audit_entry = %json,
            application_id = %record.application_id,
            storage_key = %record.storage_key,
            size_bytes = record.size_bytes,
            "File uploaded"
        );

        Ok(())
    }
}

/// Dispatch an audit append without blocking or affecting the caller.
pub fn append_detached(sink: std::sync::Arc<dyn AuditSink>, record: UploadAuditRecord) {
    tokio::spawn(async move {
        if let Err(e) = sink.append(record).await {
            tracing::warn!(error = %e, "Audit append failed");
        }
    });
}
