//! Application setup and initialization
//!
//! All initialization logic lives here, extracted from main.rs for better
//! organization and testability.

pub mod registry;
pub mod routes;
pub mod server;
pub mod storage;

use std::sync::Arc;

use anyhow::{Context, Result};
use imagegate_core::Config;

use crate::audit::TracingAuditSink;
use crate::state::AppState;

/// Initialize the entire application
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    // Validate configuration first - fail fast on misconfiguration
    config
        .validate()
        .context("Configuration validation failed")?;

    crate::telemetry::init_telemetry();

    tracing::info!("Configuration loaded and validated successfully");

    let registry = registry::setup_key_registry(&config).await?;
    let storage = storage::setup_storage(&config).await?;

    let state = Arc::new(AppState {
        config: config.clone(),
        registry,
        storage,
        audit: Arc::new(TracingAuditSink),
    });

    let router = routes::setup_routes(&config, state.clone())?;

    Ok((state, router))
}
