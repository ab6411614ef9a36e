//! Node repository implementation.

use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgConnection, PgPool};
use uuid::Uuid;

use filetree_core::error::{AppError, ErrorKind};
use filetree_core::result::AppResult;
use filetree_core::types::{NodeId, Timestamp};
use filetree_entity::node::Node;

/// Raw `nodes` row.
#[derive(Debug, FromRow)]
struct NodeRow {
    id: Uuid,
    node_type: String,
    url: Option<String>,
    parent_id: Option<Uuid>,
    size: Option<i64>,
    date: DateTime<Utc>,
}

impl TryFrom<NodeRow> for Node {
    type Error = AppError;

    fn try_from(row: NodeRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: NodeId::from_uuid(row.id),
            node_type: row.node_type.parse().map_err(|_| {
                AppError::database(format!(
                    "Node {} has unknown type '{}'",
                    row.id, row.node_type
                ))
            })?,
            url: row.url,
            parent_id: row.parent_id.map(NodeId::from_uuid),
            size: row.size,
            date: Timestamp::from(row.date),
        })
    }
}

/// Repository for the `nodes` table.
///
/// Reads go through the pool; writes take a connection so callers can run
/// them inside a transaction.
#[derive(Debug, Clone)]
pub struct NodeRepository {
    pool: PgPool,
}

impl NodeRepository {
    /// Create a new node repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Load every node.
    pub async fn find_all(&self) -> AppResult<Vec<Node>> {
        sqlx::query_as::<_, NodeRow>(
            "SELECT id, node_type, url, parent_id, size, date FROM nodes ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to load nodes", e))?
        .into_iter()
        .map(Node::try_from)
        .collect()
    }

    /// Insert or update a node. The stored type is never overwritten.
    pub async fn upsert(conn: &mut PgConnection, node: &Node) -> AppResult<()> {
        sqlx::query(
            "INSERT INTO nodes (id, node_type, url, parent_id, size, date) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             ON CONFLICT (id) DO UPDATE SET \
                url = EXCLUDED.url, \
                parent_id = EXCLUDED.parent_id, \
                size = EXCLUDED.size, \
                date = EXCLUDED.date",
        )
        .bind(node.id)
        .bind(node.node_type.as_str())
        .bind(node.url.as_deref())
        .bind(node.parent_id)
        .bind(node.size)
        .bind(node.date.as_datetime())
        .execute(conn)
        .await
        .map_err(|e| {
            AppError::with_source(
                ErrorKind::Database,
                format!("Failed to upsert node {}", node.id),
                e,
            )
        })?;
        Ok(())
    }

    /// Delete nodes by id. Descendants and history go with them through
    /// `ON DELETE CASCADE`.
    pub async fn delete_many(conn: &mut PgConnection, ids: &[NodeId]) -> AppResult<u64> {
        let ids: Vec<Uuid> = ids.iter().map(|id| id.into_uuid()).collect();
        let result = sqlx::query("DELETE FROM nodes WHERE id = ANY($1)")
            .bind(&ids)
            .execute(conn)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete nodes", e))?;
        Ok(result.rows_affected())
    }
}
