//! Storage abstraction trait
//!
//! This module defines the Storage trait that all storage backends must
//! implement, plus the metadata written alongside every object.

use async_trait::async_trait;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use imagegate_core::StorageBackend;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Signing failed: {0}")]
    SigningFailed(String),

    #[error("Delete failed: {0}")]
    DeleteFailed(String),

    #[error("File not found: {0}")]
    NotFound(String),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("Storage backend error: {0}")]
    BackendError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Descriptive metadata persisted with every stored object.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObjectMetadata {
    /// Filename as supplied by the uploader.
    pub original_filename: String,
    /// Byte length of the object body.
    pub size_bytes: u64,
    /// When the upload was accepted.
    pub uploaded_at: DateTime<Utc>,
    /// Tag identifying the writing service.
    pub upload_source: String,
}

/// Storage abstraction trait
///
/// All storage backends (S3, local filesystem) must implement this trait.
/// The upload pipeline works against it without coupling to backend details.
///
/// **Key format:** see the crate root documentation. Keys are produced by
/// [`crate::keys::resolve_storage_key`] and validated there.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Write an object under the given key with its content type and
    /// descriptive metadata. Overwrites silently; last write wins.
    async fn put(
        &self,
        storage_key: &str,
        data: Bytes,
        content_type: &str,
        metadata: &ObjectMetadata,
    ) -> StorageResult<()>;

    /// Generate a time-limited URL for downloading the object.
    async fn presigned_download_url(
        &self,
        storage_key: &str,
        expires_in: Duration,
    ) -> StorageResult<String>;

    /// Check if an object exists
    async fn exists(&self, storage_key: &str) -> StorageResult<bool>;

    /// Delete an object by its storage key
    async fn delete(&self, storage_key: &str) -> StorageResult<()>;

    /// Get the storage backend type
    fn backend_type(&self) -> StorageBackend;
}
