//! Postgres-backed key store.

use async_trait::async_trait;
use imagegate_core::ApiKeyRecord;
use sqlx::{PgPool, Postgres};

use super::{KeyStore, KeyStoreError, KeyStoreResult};

/// Key store reading the `api_keys` table. Read-only from the upload path's
/// perspective; records are provisioned out-of-band.
#[derive(Clone)]
pub struct PgKeyStore {
    pool: PgPool,
}

impl PgKeyStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl KeyStore for PgKeyStore {
    #[tracing::instrument(skip(self, api_key), fields(db.table = "api_keys", db.operation = "select"))]
    async fn lookup(&self, api_key: &str) -> KeyStoreResult<Vec<ApiKeyRecord>> {
        let records = sqlx::query_as::<Postgres, ApiKeyRecord>(
            r#"
            SELECT key, application_id, path, disabled, expires_at, created_at
            FROM api_keys
            WHERE key = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(api_key)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Failed to look up API key");
            KeyStoreError::LookupFailed(e.to_string())
        })?;

        Ok(records)
    }
}
