//! Authorization semantics on top of a key store.

use std::fmt::{Display, Formatter, Result as FmtResult};
use std::sync::Arc;

use chrono::Utc;
use imagegate_core::ApiKeyRecord;

use crate::store::KeyStore;

/// Why a key was refused. Logged and audited internally; the HTTP layer
/// answers a uniform "Invalid API key" so registry state never leaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthDenied {
    KeyAbsent,
    KeyDisabled,
    KeyExpired,
    KeyNotFound,
}

impl Display for AuthDenied {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            AuthDenied::KeyAbsent => write!(f, "API key missing"),
            AuthDenied::KeyDisabled => write!(f, "API key is disabled"),
            AuthDenied::KeyExpired => write!(f, "API key has expired"),
            AuthDenied::KeyNotFound => write!(f, "API key not found"),
        }
    }
}

/// Outcome of an authorization check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthOutcome {
    Authorized {
        application_id: String,
        path: Option<String>,
    },
    Denied(AuthDenied),
}

/// Answers "is this key currently usable, and what does it grant?"
#[derive(Clone)]
pub struct KeyRegistry {
    store: Arc<dyn KeyStore>,
}

impl KeyRegistry {
    pub fn new(store: Arc<dyn KeyStore>) -> Self {
        Self { store }
    }

    /// Authorize an API key.
    ///
    /// An absent or empty key is refused without touching the store. A store
    /// failure counts as not-found: authorization fails closed, never open,
    /// on infrastructure error. When a backend holds several records for one
    /// key, the most recently created one is authoritative.
    pub async fn authorize(&self, api_key: Option<&str>) -> AuthOutcome {
        let api_key = match api_key {
            Some(key) if !key.is_empty() => key,
            _ => return AuthOutcome::Denied(AuthDenied::KeyAbsent),
        };

        let mut candidates = match self.store.lookup(api_key).await {
            Ok(candidates) => candidates,
            Err(e) => {
                tracing::error!(error = %e, "Key store lookup failed, refusing key");
                return AuthOutcome::Denied(AuthDenied::KeyNotFound);
            }
        };

        candidates.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        let record: ApiKeyRecord = match candidates.into_iter().next() {
            Some(record) => record,
            None => return AuthOutcome::Denied(AuthDenied::KeyNotFound),
        };

        if record.disabled {
            return AuthOutcome::Denied(AuthDenied::KeyDisabled);
        }
        if record.is_expired(Utc::now()) {
            return AuthOutcome::Denied(AuthDenied::KeyExpired);
        }

        AuthOutcome::Authorized {
            application_id: record.application_id.clone(),
            path: record.normalized_path().map(String::from),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::MemoryKeyStore;
    use crate::store::{KeyStoreError, KeyStoreResult};
    use async_trait::async_trait;
    use chrono::{DateTime, Duration, Utc};

    struct FailingKeyStore;

    #[async_trait]
    impl KeyStore for FailingKeyStore {
        async fn lookup(&self, _api_key: &str) -> KeyStoreResult<Vec<ApiKeyRecord>> {
            Err(KeyStoreError::LookupFailed("connection refused".to_string()))
        }
    }

    fn record(
        key: &str,
        disabled: bool,
        expires_at: Option<DateTime<Utc>>,
        path: Option<&str>,
        created_at: DateTime<Utc>,
    ) -> ApiKeyRecord {
        ApiKeyRecord {
            key: key.to_string(),
            application_id: "app1".to_string(),
            path: path.map(String::from),
            disabled,
            expires_at,
            created_at,
        }
    }

    async fn registry_with(records: Vec<ApiKeyRecord>) -> KeyRegistry {
        let store = MemoryKeyStore::new();
        for rec in records {
            store.insert(rec).await;
        }
        KeyRegistry::new(Arc::new(store))
    }

    #[tokio::test]
    async fn test_absent_key_denied_without_lookup() {
        let registry = KeyRegistry::new(Arc::new(FailingKeyStore));
        assert_eq!(
            registry.authorize(None).await,
            AuthOutcome::Denied(AuthDenied::KeyAbsent)
        );
        assert_eq!(
            registry.authorize(Some("")).await,
            AuthOutcome::Denied(AuthDenied::KeyAbsent)
        );
    }

    #[tokio::test]
    async fn test_unknown_key_not_found() {
        let registry = registry_with(vec![]).await;
        assert_eq!(
            registry.authorize(Some("nope")).await,
            AuthOutcome::Denied(AuthDenied::KeyNotFound)
        );
    }

    #[tokio::test]
    async fn test_store_failure_fails_closed() {
        let registry = KeyRegistry::new(Arc::new(FailingKeyStore));
        assert_eq!(
            registry.authorize(Some("any")).await,
            AuthOutcome::Denied(AuthDenied::KeyNotFound)
        );
    }

    #[tokio::test]
    async fn test_disabled_key_denied_regardless_of_expiry() {
        let now = Utc::now();
        let registry = registry_with(vec![record(
            "k1",
            true,
            Some(now + Duration::days(30)),
            None,
            now,
        )])
        .await;
        assert_eq!(
            registry.authorize(Some("k1")).await,
            AuthOutcome::Denied(AuthDenied::KeyDisabled)
        );
    }

    #[tokio::test]
    async fn test_expired_key_denied() {
        let now = Utc::now();
        let registry = registry_with(vec![record(
            "k1",
            false,
            Some(now - Duration::hours(1)),
            None,
            now - Duration::days(1),
        )])
        .await;
        assert_eq!(
            registry.authorize(Some("k1")).await,
            AuthOutcome::Denied(AuthDenied::KeyExpired)
        );
    }

    #[tokio::test]
    async fn test_valid_key_authorized_with_path() {
        let now = Utc::now();
        let registry = registry_with(vec![record(
            "k1",
            false,
            Some(now + Duration::days(1)),
            Some("uploads/2024"),
            now,
        )])
        .await;
        assert_eq!(
            registry.authorize(Some("k1")).await,
            AuthOutcome::Authorized {
                application_id: "app1".to_string(),
                path: Some("uploads/2024".to_string()),
            }
        );
    }

    #[tokio::test]
    async fn test_empty_path_normalized_to_none() {
        let now = Utc::now();
        let registry = registry_with(vec![record("k1", false, None, Some(""), now)]).await;
        assert_eq!(
            registry.authorize(Some("k1")).await,
            AuthOutcome::Authorized {
                application_id: "app1".to_string(),
                path: None,
            }
        );
    }

    #[tokio::test]
    async fn test_newest_record_is_authoritative() {
        let now = Utc::now();
        // The older record is usable, the newer one is disabled; the newer
        // record must win the tie-break.
        let registry = registry_with(vec![
            record("k1", false, None, None, now - Duration::days(2)),
            record("k1", true, None, None, now - Duration::days(1)),
        ])
        .await;
        assert_eq!(
            registry.authorize(Some("k1")).await,
            AuthOutcome::Denied(AuthDenied::KeyDisabled)
        );
    }
}
