//! History repository implementation.

use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgConnection, PgPool};
use uuid::Uuid;

use filetree_core::error::{AppError, ErrorKind};
use filetree_core::result::AppResult;
use filetree_core::types::{NodeId, Timestamp};
use filetree_entity::history::HistoryRecord;

/// Raw `node_history` row.
#[derive(Debug, FromRow)]
struct HistoryRow {
    node_id: Uuid,
    node_type: String,
    url: Option<String>,
    parent_id: Option<Uuid>,
    size: i64,
    date: DateTime<Utc>,
}

impl TryFrom<HistoryRow> for HistoryRecord {
    type Error = AppError;

    fn try_from(row: HistoryRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: NodeId::from_uuid(row.node_id),
            node_type: row.node_type.parse().map_err(|_| {
                AppError::database(format!(
                    "History of {} has unknown type '{}'",
                    row.node_id, row.node_type
                ))
            })?,
            url: row.url,
            parent_id: row.parent_id.map(NodeId::from_uuid),
            size: row.size,
            date: Timestamp::from(row.date),
        })
    }
}

/// Repository for the append-only `node_history` table.
#[derive(Debug, Clone)]
pub struct HistoryRepository {
    pool: PgPool,
}

impl HistoryRepository {
    /// Create a new history repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Load every snapshot, grouped by node and ordered by date then
    /// insertion order.
    pub async fn find_all(&self) -> AppResult<Vec<HistoryRecord>> {
        sqlx::query_as::<_, HistoryRow>(
            "SELECT node_id, node_type, url, parent_id, size, date FROM node_history \
             ORDER BY node_id, date, seq",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to load history", e))?
        .into_iter()
        .map(HistoryRecord::try_from)
        .collect()
    }

    /// Append one snapshot.
    pub async fn insert(conn: &mut PgConnection, record: &HistoryRecord) -> AppResult<()> {
        sqlx::query(
            "INSERT INTO node_history (node_id, node_type, url, parent_id, size, date) \
             VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(record.id)
        .bind(record.node_type.as_str())
        .bind(record.url.as_deref())
        .bind(record.parent_id)
        .bind(record.size)
        .bind(record.date.as_datetime())
        .execute(conn)
        .await
        .map_err(|e| {
            AppError::with_source(
                ErrorKind::Database,
                format!("Failed to record history for {}", record.id),
                e,
            )
        })?;
        Ok(())
    }
}
