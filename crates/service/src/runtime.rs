//! Runtime environment helpers
//!
//! Startup-time wiring shared by binaries and integration tests: directory
//! checks and opening the configured grid collection.

use std::sync::Arc;

use configs::{AppConfig, StoreBackend};
use migration::MigratorTrait;
use tracing::info;

use crate::grid::repo::{FileGridCollection, MemoryGridCollection, SeaOrmGridCollection};
use crate::grid::GridCollection;

/// Ensure expected directories exist; warn on missing optional ones.
pub async fn ensure_env(static_dir: &str, data_dir: &str) -> anyhow::Result<()> {
    common::env::ensure_env(static_dir, data_dir).await
}

/// Open the collection selected by `[store] backend`.
/// The postgres backend runs pending migrations before returning.
pub async fn open_collection(cfg: &AppConfig) -> anyhow::Result<Arc<dyn GridCollection>> {
    let collection: Arc<dyn GridCollection> = match cfg.store.backend {
        StoreBackend::Memory => Arc::new(MemoryGridCollection::new()),
        StoreBackend::File => {
            ensure_env(&cfg.server.static_dir, common::env::data_dir_of(&cfg.store.file_path)).await?;
            Arc::new(FileGridCollection::open(&cfg.store.file_path).await?)
        }
        StoreBackend::Postgres => {
            let db = models::db::connect_with_config(&(&cfg.database).into()).await?;
            migration::Migrator::up(&db, None).await?;
            Arc::new(SeaOrmGridCollection::new(db))
        }
    };
    info!(backend = ?cfg.store.backend, "grid collection opened");
    Ok(collection)
}
