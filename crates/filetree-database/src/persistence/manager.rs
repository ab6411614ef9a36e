//! Persistence manager that dispatches to the configured backend.

use std::sync::Arc;

use tracing::info;

use filetree_core::config::{DatabaseBackend, DatabaseConfig};
use filetree_core::result::AppResult;

use crate::connection::DatabasePool;
use crate::migration::run_migrations;

use super::{MemoryPersistence, PgTreePersistence, TreePersistence};

/// Wraps the persistence backend selected at construction time.
#[derive(Debug, Clone)]
pub struct PersistenceManager {
    inner: Arc<dyn TreePersistence>,
}

impl PersistenceManager {
    /// Create the backend named in configuration. For PostgreSQL this
    /// connects and, unless disabled, applies pending migrations.
    pub async fn new(config: &DatabaseConfig) -> AppResult<Self> {
        let inner: Arc<dyn TreePersistence> = match config.backend {
            DatabaseBackend::Postgres => {
                info!("Initializing PostgreSQL persistence");
                let db = DatabasePool::connect(config).await?;
                if config.run_migrations {
                    run_migrations(db.pool()).await?;
                }
                Arc::new(PgTreePersistence::new(db))
            }
            DatabaseBackend::Memory => {
                info!("Initializing in-memory persistence");
                Arc::new(MemoryPersistence::new())
            }
        };

        Ok(Self { inner })
    }

    /// Create a manager from an existing backend (for testing).
    pub fn from_provider(provider: Arc<dyn TreePersistence>) -> Self {
        Self { inner: provider }
    }

    /// Shared handle to the backend.
    pub fn provider(&self) -> Arc<dyn TreePersistence> {
        Arc::clone(&self.inner)
    }
}
