//! Shared constants.

/// Root prefix for every tenant-scoped storage key.
pub const STORAGE_KEY_ROOT: &str = "applications";

/// Value stored in object metadata identifying this service as the writer.
pub const UPLOAD_SOURCE_TAG: &str = "imagegate";

/// Content types accepted for upload must start with this prefix.
pub const IMAGE_CONTENT_TYPE_PREFIX: &str = "image/";

/// Default lifetime of generated download URLs, in days.
pub const DEFAULT_DOWNLOAD_URL_TTL_DAYS: u64 = 7;

/// Default cap on the raw upload body, in megabytes.
pub const DEFAULT_MAX_UPLOAD_SIZE_MB: usize = 10;
