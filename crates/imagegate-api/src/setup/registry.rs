//! Key registry setup and initialization

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use imagegate_core::{Config, RegistryBackend};
use imagegate_registry::{KeyRegistry, MemoryKeyStore, PgKeyStore};
use sqlx::postgres::PgPoolOptions;

/// Setup the key registry for the configured backend. The postgres backend
/// connects a pool and runs pending migrations on startup.
pub async fn setup_key_registry(config: &Config) -> Result<KeyRegistry> {
    match config.registry_backend {
        RegistryBackend::Postgres => {
            let database_url = config
                .database_url
                .as_deref()
                .context("DATABASE_URL must be set for the postgres registry backend")?;

            tracing::info!("Connecting to key registry database...");
            let pool = PgPoolOptions::new()
                .max_connections(config.db_max_connections)
                .acquire_timeout(Duration::from_secs(config.db_timeout_seconds))
                .idle_timeout(Duration::from_secs(600))
                .max_lifetime(Duration::from_secs(1800))
                .connect(database_url)
                .await?;

            tracing::info!(
                max_connections = config.db_max_connections,
                "Key registry database connected"
            );

            // Run pending migrations on startup (path: workspace migrations/ from crate root)
            let migrations_dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../migrations");
            let migrator = sqlx::migrate::Migrator::new(migrations_dir)
                .await
                .context("Failed to load migrations")?;
            migrator
                .run(&pool)
                .await
                .context("Failed to run database migrations")?;
            tracing::info!("Database migrations applied");

            Ok(KeyRegistry::new(Arc::new(PgKeyStore::new(pool))))
        }

        RegistryBackend::Memory => {
            tracing::warn!(
                "Using in-memory key registry - keys are lost on restart, development only"
            );
            Ok(KeyRegistry::new(Arc::new(MemoryKeyStore::new())))
        }
    }
}
