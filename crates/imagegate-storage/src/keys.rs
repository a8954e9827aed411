//! Storage-key resolution.
//!
//! Key format: `applications/{application_id}/{filename}`, or
//! `applications/{application_id}/{path}/{filename}` when the authorizing
//! record carries a sub-path. The sub-path is used verbatim as one or more
//! segments, but every component is checked against directory escapes: a
//! registry record must not be able to place objects outside its tenant's
//! namespace.

use imagegate_core::constants::STORAGE_KEY_ROOT;

use crate::traits::{StorageError, StorageResult};

/// Resolve the storage key for an upload. Pure; no I/O.
pub fn resolve_storage_key(
    application_id: &str,
    path: Option<&str>,
    filename: &str,
) -> StorageResult<String> {
    reject_escaping(application_id, "application id")?;
    if let Some(path) = path {
        reject_escaping(path, "path")?;
    }
    reject_escaping(filename, "filename")?;

    Ok(match path {
        Some(path) => format!("{}/{}/{}/{}", STORAGE_KEY_ROOT, application_id, path, filename),
        None => format!("{}/{}/{}", STORAGE_KEY_ROOT, application_id, filename),
    })
}

fn reject_escaping(component: &str, what: &str) -> StorageResult<()> {
    if component.is_empty() {
        return Err(StorageError::InvalidKey(format!(
            "{} must not be empty",
            what
        )));
    }
    if component.starts_with('/') {
        return Err(StorageError::InvalidKey(format!(
            "{} must not be an absolute path",
            what
        )));
    }
    if component.split('/').any(|segment| segment == "..") {
        return Err(StorageError::InvalidKey(format!(
            "{} must not contain '..' segments",
            what
        )));
    }
    Ok(())
}
