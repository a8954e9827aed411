//! API key record as held by the key registry.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One issued API key.
///
/// Records are created out-of-band by an administrative process; the upload
/// path only ever reads them. A record is usable iff it exists, `disabled` is
/// false, and `expires_at` is absent or in the future.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct ApiKeyRecord {
    /// Opaque key string, also the lookup key.
    pub key: String,
    /// Tenant ("application") the key grants access to.
    pub application_id: String,
    /// Optional tenant-relative sub-path prefix.
    pub path: Option<String>,
    /// Once true, the key is unusable until explicitly re-enabled.
    pub disabled: bool,
    /// Once passed, the key is unusable regardless of `disabled`.
    pub expires_at: Option<DateTime<Utc>>,
    /// Creation time; the newest record wins when a backend yields several
    /// candidates for one key.
    pub created_at: DateTime<Utc>,
}

impl ApiKeyRecord {
    /// Check whether the record's expiry has passed at `now`.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        match self.expires_at {
            Some(expires_at) => expires_at < now,
            None => false,
        }
    }

    /// Sub-path with the empty string normalized away; an empty path must
    /// never become an empty segment in a storage key.
    pub fn normalized_path(&self) -> Option<&str> {
        self.path.as_deref().filter(|p| !p.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn record(expires_at: Option<DateTime<Utc>>, path: Option<&str>) -> ApiKeyRecord {
        ApiKeyRecord {
            key: "ig_test_key".to_string(),
            application_id: "app1".to_string(),
            path: path.map(String::from),
            disabled: false,
            expires_at,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_is_expired_with_expired_key() {
        let now = Utc::now();
        let rec = record(Some(now - Duration::days(1)), None);
        assert!(rec.is_expired(now));
    }

    #[test]
    fn test_is_expired_with_valid_key() {
        let now = Utc::now();
        let rec = record(Some(now + Duration::days(1)), None);
        assert!(!rec.is_expired(now));
    }

    #[test]
    fn test_is_expired_with_no_expiration() {
        let now = Utc::now();
        let rec = record(None, None);
        assert!(!rec.is_expired(now));
    }

    #[test]
    fn test_normalized_path_drops_empty_string() {
        assert_eq!(record(None, Some("")).normalized_path(), None);
        assert_eq!(
            record(None, Some("uploads/2024")).normalized_path(),
            Some("uploads/2024")
        );
        assert_eq!(record(None, None).normalized_path(), None);
    }
}
