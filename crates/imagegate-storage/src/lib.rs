//! Imagegate Storage Library
//!
//! Object-store abstraction and implementations for imagegate: the `Storage`
//! trait with S3 and local-filesystem backends, plus storage-key resolution.
//!
//! # Storage key format
//!
//! Keys are tenant-scoped: `applications/{application_id}/{filename}`, or
//! `applications/{application_id}/{path}/{filename}` when the authorizing
//! key carries a sub-path. The `path` segment is omitted entirely when
//! absent, never left as an empty segment. Keys must not contain `..`
//! segments or a leading `/`; resolution is centralized in the `keys`
//! module so all backends stay consistent.

pub mod factory;
pub mod keys;
pub mod local;
pub mod s3;
pub mod traits;

// Re-export commonly used types
pub use factory::create_storage;
pub use imagegate_core::StorageBackend;
pub use keys::resolve_storage_key;
pub use local::LocalStorage;
pub use s3::S3Storage;
pub use traits::{ObjectMetadata, Storage, StorageError, StorageResult};
