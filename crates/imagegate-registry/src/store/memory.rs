//! In-memory key store, for development and tests.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use imagegate_core::ApiKeyRecord;
use tokio::sync::RwLock;

use super::{KeyStore, KeyStoreResult};

/// Key store holding records in process memory behind the production trait.
#[derive(Clone, Default)]
pub struct MemoryKeyStore {
    records: Arc<RwLock<HashMap<String, Vec<ApiKeyRecord>>>>,
}

impl MemoryKeyStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a record; several records may share one key.
    pub async fn insert(&self, record: ApiKeyRecord) {
        let mut guard = self.records.write().await;
        guard.entry(record.key.clone()).or_default().push(record);
    }
}

#[async_trait]
impl KeyStore for MemoryKeyStore {
    async fn lookup(&self, api_key: &str) -> KeyStoreResult<Vec<ApiKeyRecord>> {
        let guard = self.records.read().await;
        Ok(guard.get(api_key).cloned().unwrap_or_default())
    }
}
