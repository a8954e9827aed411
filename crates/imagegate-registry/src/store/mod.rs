//! Key-store backend abstraction.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use imagegate_core::ApiKeyRecord;
use thiserror::Error;

/// Key-store operation errors
#[derive(Debug, Error)]
pub enum KeyStoreError {
    #[error("Lookup failed: {0}")]
    LookupFailed(String),

    #[error("Key store backend error: {0}")]
    BackendError(String),
}

/// Result type for key-store operations
pub type KeyStoreResult<T> = Result<T, KeyStoreError>;

/// Key-store backend trait.
///
/// A backend returns every candidate record held for a key; zero, one, or
/// several. Selection between candidates is not the backend's concern -
/// [`crate::KeyRegistry`] applies the newest-record tie-break so that
/// ordering differences between backends never change the outcome.
#[async_trait]
pub trait KeyStore: Send + Sync {
    /// Fetch all candidate records for the given key.
    async fn lookup(&self, api_key: &str) -> KeyStoreResult<Vec<ApiKeyRecord>>;
}
