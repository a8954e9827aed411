//! Storage setup and initialization

use std::sync::Arc;

use anyhow::Result;
use imagegate_core::Config;
use imagegate_storage::{create_storage, Storage};

/// Setup the object-store backend from configuration.
pub async fn setup_storage(config: &Config) -> Result<Arc<dyn Storage>> {
    tracing::info!("Initializing storage abstraction...");
    let storage = create_storage(config).await?;
    tracing::info!(
        backend = %storage.backend_type(),
        "Storage abstraction initialized successfully"
    );
    Ok(storage)
}
