//! Result of a completed upload.

use serde::Serialize;

/// What was stored and where to fetch it from.
#[derive(Debug, Clone, Serialize)]
pub struct StoredFile {
    /// Original filename from the content-disposition header.
    pub name: String,
    /// Byte size of the stored object.
    pub size: u64,
    /// Content type the object was stored with.
    pub content_type: String,
    /// Tenant-scoped key the object lives under.
    pub storage_key: String,
    /// Time-limited retrieval URL.
    pub download_url: String,
}
