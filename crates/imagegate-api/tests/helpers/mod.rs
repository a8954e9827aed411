//! Test helpers: build the router over in-memory backends.
//!
//! Run with: `cargo test -p imagegate-api`. No external services needed -
//! the key registry is the in-memory store and objects land in a temp dir.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum_test::TestServer;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use imagegate_api::audit::TracingAuditSink;
use imagegate_api::setup::routes::setup_routes;
use imagegate_api::state::AppState;
use imagegate_core::{ApiKeyRecord, Config, RegistryBackend, StorageBackend};
use imagegate_registry::{KeyRegistry, KeyStore, KeyStoreResult, MemoryKeyStore};
use imagegate_storage::{
    LocalStorage, ObjectMetadata, Storage, StorageError, StorageResult,
};
use tempfile::TempDir;

pub const TEST_API_KEY: &str = "ig_live_0123456789abcdef";

/// Test application over local storage and an in-memory key registry.
pub struct TestApp {
    pub server: TestServer,
    pub key_store: MemoryKeyStore,
    pub storage_dir: TempDir,
}

pub fn test_config() -> Config {
    Config {
        server_port: 0,
        environment: "test".to_string(),
        cors_origins: vec!["*".to_string()],
        storage_backend: StorageBackend::Local,
        s3_bucket: None,
        s3_region: None,
        s3_endpoint: None,
        aws_region: None,
        local_storage_path: None,
        local_storage_base_url: None,
        registry_backend: RegistryBackend::Memory,
        database_url: None,
        db_max_connections: 5,
        db_timeout_seconds: 5,
        max_upload_size_bytes: 10 * 1024 * 1024,
        download_url_ttl: Duration::from_secs(7 * 24 * 60 * 60),
    }
}

/// Build a TestServer around arbitrary collaborators.
pub fn test_server(storage: Arc<dyn Storage>, registry: KeyRegistry) -> TestServer {
    let config = test_config();
    let state = Arc::new(AppState {
        config: config.clone(),
        registry,
        storage,
        audit: Arc::new(TracingAuditSink),
    });
    let router = setup_routes(&config, state).expect("Failed to build router");
    TestServer::new(router).expect("Failed to start test server")
}

/// Setup test app with local storage in a temp dir.
pub async fn setup_test_app() -> TestApp {
    let storage_dir = tempfile::tempdir().expect("Failed to create temp directory");
    let storage: Arc<dyn Storage> = Arc::new(
        LocalStorage::new(
            storage_dir.path(),
            "http://localhost:8080/files".to_string(),
        )
        .await
        .expect("Failed to create local storage"),
    );

    let key_store = MemoryKeyStore::new();
    let registry = KeyRegistry::new(Arc::new(key_store.clone()));
    let server = test_server(storage, registry);

    TestApp {
        server,
        key_store,
        storage_dir,
    }
}

/// Insert a usable key into the registry.
pub async fn seed_key(store: &MemoryKeyStore, key: &str, application_id: &str, path: Option<&str>) {
    seed_key_record(store, key, application_id, path, false, None).await;
}

pub async fn seed_key_record(
    store: &MemoryKeyStore,
    key: &str,
    application_id: &str,
    path: Option<&str>,
    disabled: bool,
    expires_at: Option<DateTime<Utc>>,
) {
    store
        .insert(ApiKeyRecord {
            key: key.to_string(),
            application_id: application_id.to_string(),
            path: path.map(String::from),
            disabled,
            expires_at,
            created_at: Utc::now(),
        })
        .await;
}

/// Storage whose writes always fail, for exercising the 500 path.
pub struct FailingStorage;

#[async_trait]
impl Storage for FailingStorage {
    async fn put(
        &self,
        _storage_key: &str,
        _data: Bytes,
        _content_type: &str,
        _metadata: &ObjectMetadata,
    ) -> StorageResult<()> {
        Err(StorageError::UploadFailed(
            "simulated backend outage".to_string(),
        ))
    }

    async fn presigned_download_url(
        &self,
        _storage_key: &str,
        _expires_in: Duration,
    ) -> StorageResult<String> {
        Err(StorageError::SigningFailed(
            "simulated backend outage".to_string(),
        ))
    }

    async fn exists(&self, _storage_key: &str) -> StorageResult<bool> {
        Ok(false)
    }

    async fn delete(&self, _storage_key: &str) -> StorageResult<()> {
        Ok(())
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Local
    }
}

/// Storage that persists writes but cannot sign download URLs, for the
/// fail-after-write inconsistency.
pub struct UnsignableStorage {
    pub inner: LocalStorage,
}

#[async_trait]
impl Storage for UnsignableStorage {
    async fn put(
        &self,
        storage_key: &str,
        data: Bytes,
        content_type: &str,
        metadata: &ObjectMetadata,
    ) -> StorageResult<()> {
        self.inner.put(storage_key, data, content_type, metadata).await
    }

    async fn presigned_download_url(
        &self,
        _storage_key: &str,
        _expires_in: Duration,
    ) -> StorageResult<String> {
        Err(StorageError::SigningFailed(
            "signer unavailable".to_string(),
        ))
    }

    async fn exists(&self, storage_key: &str) -> StorageResult<bool> {
        self.inner.exists(storage_key).await
    }

    async fn delete(&self, storage_key: &str) -> StorageResult<()> {
        self.inner.delete(storage_key).await
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Local
    }
}

/// Key store that must never be reached; proves validation short-circuits
/// before any registry I/O.
pub struct UnreachableKeyStore;

#[async_trait]
impl KeyStore for UnreachableKeyStore {
    async fn lookup(&self, _api_key: &str) -> KeyStoreResult<Vec<ApiKeyRecord>> {
        panic!("key registry must not be reached for a structurally invalid request");
    }
}
