//! PostgreSQL pool and write transactions for the tree tables.

use std::fmt;
use std::time::{Duration, Instant};

use sqlx::postgres::{PgPool, PgPoolOptions};
use sqlx::{PgConnection, Postgres, Transaction};
use tracing::{debug, info};

use filetree_core::config::DatabaseConfig;
use filetree_core::error::{AppError, ErrorKind};
use filetree_core::result::AppResult;

/// Tables a usable database must contain.
const TREE_TABLES: [&str; 2] = ["nodes", "node_history"];

/// Shared sqlx pool for the tree backend.
#[derive(Debug, Clone)]
pub struct DatabasePool {
    pool: PgPool,
}

impl DatabasePool {
    /// Connect using the pool settings from `config`.
    pub async fn connect(config: &DatabaseConfig) -> AppResult<Self> {
        info!(
            url = %redact_url(&config.url),
            max_connections = config.max_connections,
            min_connections = config.min_connections,
            "Connecting to PostgreSQL"
        );

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(Duration::from_secs(config.connect_timeout_seconds))
            .idle_timeout(Duration::from_secs(config.idle_timeout_seconds))
            .connect(&config.url)
            .await
            .map_err(|e| db_error("Failed to connect to database", e))?;

        info!("Connected to PostgreSQL");
        Ok(Self { pool })
    }

    /// The underlying sqlx pool, for reads and migrations.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Start a write transaction. `operation` names it in logs and errors.
    pub async fn begin_write(&self, operation: &'static str) -> AppResult<WriteTransaction> {
        let tx = self
            .pool
            .begin()
            .await
            .map_err(|e| db_error(format!("Failed to start {operation}"), e))?;
        Ok(WriteTransaction {
            tx,
            operation,
            started: Instant::now(),
        })
    }

    /// Check that the database answers and holds the tree tables.
    pub async fn health_check(&self) -> AppResult<bool> {
        let present: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM information_schema.tables \
             WHERE table_schema = current_schema() AND table_name = ANY($1)",
        )
        .bind(TREE_TABLES.map(String::from).to_vec())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| db_error("Health check failed", e))?;

        Ok(present == TREE_TABLES.len() as i64)
    }

    /// Close all connections in the pool.
    pub async fn close(&self) {
        self.pool.close().await;
        info!("Database pool closed");
    }
}

/// One import or delete, applied atomically.
///
/// Dropping it without calling [`WriteTransaction::commit`] rolls back.
pub struct WriteTransaction {
    tx: Transaction<'static, Postgres>,
    operation: &'static str,
    started: Instant,
}

impl fmt::Debug for WriteTransaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WriteTransaction")
            .field("operation", &self.operation)
            .finish_non_exhaustive()
    }
}

impl WriteTransaction {
    /// Connection to run repository writes on.
    pub fn conn(&mut self) -> &mut PgConnection {
        &mut self.tx
    }

    /// Commit every write made through [`WriteTransaction::conn`].
    pub async fn commit(self) -> AppResult<()> {
        let operation = self.operation;
        self.tx
            .commit()
            .await
            .map_err(|e| db_error(format!("Failed to commit {operation}"), e))?;
        debug!(
            operation,
            elapsed_ms = self.started.elapsed().as_millis() as u64,
            "Transaction committed"
        );
        Ok(())
    }
}

fn db_error(message: impl Into<String>, e: sqlx::Error) -> AppError {
    AppError::with_source(ErrorKind::Database, message, e)
}

/// Replace the password in a connection URL with `****`.
fn redact_url(url: &str) -> String {
    let Some(at) = url.rfind('@') else {
        return url.to_string();
    };
    let scheme_end = url.find("://").map_or(0, |p| p + 3);
    match url.get(scheme_end..at).and_then(|userinfo| userinfo.find(':')) {
        Some(colon) => {
            let colon = scheme_end + colon;
            format!("{}:****{}", &url[..colon], &url[at..])
        }
        None => url.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redact_url_hides_password() {
        assert_eq!(
            redact_url("postgres://filetree:s3cret@db:5432/filetree"),
            "postgres://filetree:****@db:5432/filetree"
        );
    }

    #[test]
    fn test_redact_url_without_credentials() {
        assert_eq!(
            redact_url("postgres://db:5432/filetree"),
            "postgres://db:5432/filetree"
        );
        assert_eq!(
            redact_url("postgres://filetree@db/filetree"),
            "postgres://filetree@db/filetree"
        );
        assert_eq!(redact_url("a@b://db"), "a@b://db");
    }

    #[test]
    fn test_redact_url_password_containing_at() {
        assert_eq!(
            redact_url("postgres://filetree:p@ss@db/filetree"),
            "postgres://filetree:****@db/filetree"
        );
    }
}
