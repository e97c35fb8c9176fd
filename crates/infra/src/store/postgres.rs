//! Postgres-backed inventory collection.
//!
//! Documents live in the `inventory_items` table (see `crate::migrations`).
//! Filters are compiled to SQL with bound parameters; search terms go through
//! `like_pattern` so they match literally under `ILIKE`.
//!
//! ## Error Mapping
//!
//! | SQLx Error | PostgreSQL Error Code | StoreError | Scenario |
//! |------------|----------------------|------------|----------|
//! | Database (check violation) | `23514` | `Rejected` | negative quantity, blank name, unknown status |
//! | Database (not-null violation) | `23502` | `Rejected` | missing required column |
//! | Database (other) | Any other | `Unavailable` | schema missing, permission denied, ... |
//! | PoolClosed / PoolTimedOut / Io / Tls | N/A | `Unavailable` | connectivity |
//! | Decode / ColumnDecode | N/A | `Unavailable` | row does not match the model |

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{PgPool, Postgres, QueryBuilder, Row};
use tracing::instrument;

use stockroom_core::{ItemId, OwnerId};
use stockroom_inventory::{Item, ItemPatch, ItemStatus, NewItem};

use super::filter::like_pattern;
use super::{BatchInsert, ItemCollection, ItemFilter, RejectedDocument, StoreError, UpdateOutcome};

const SELECT_ITEMS: &str = r#"
    SELECT id, name, description, drawing, quantity, status, owner_id, updated_at
    FROM inventory_items
    WHERE "#;

/// Postgres-backed inventory collection.
///
/// ## Thread Safety
///
/// Uses the SQLx connection pool, which is `Send + Sync`; the pool is opened
/// once at startup and shared for the process lifetime.
///
/// ## Ordering
///
/// `find` orders by the `seq` column, i.e. insertion order.
#[derive(Debug, Clone)]
pub struct PostgresItemCollection {
    pool: Arc<PgPool>,
}

impl PostgresItemCollection {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool: Arc::new(pool),
        }
    }

    /// Open a pool against `database_url`.
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<PgPool, StoreError> {
        PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await
            .map_err(|e| map_sqlx_error("connect", e))
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    async fn insert_row(&self, new: &NewItem) -> Result<ItemId, StoreError> {
        let id = ItemId::new();

        sqlx::query(
            r#"
            INSERT INTO inventory_items (
                id,
                name,
                description,
                drawing,
                quantity,
                status,
                owner_id,
                updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(id.as_uuid())
        .bind(&new.name)
        .bind(&new.description)
        .bind(&new.drawing)
        .bind(new.quantity)
        .bind(new.status.as_str())
        .bind(new.owner_id.as_str())
        .bind(new.updated_at)
        .execute(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("insert", e))?;

        Ok(id)
    }
}

#[async_trait]
impl ItemCollection for PostgresItemCollection {
    #[instrument(skip(self), err)]
    async fn find(&self, filter: &ItemFilter, skip: u64, limit: u64) -> Result<Vec<Item>, StoreError> {
        if limit == 0 {
            return Ok(vec![]);
        }

        let mut qb = QueryBuilder::<Postgres>::new(SELECT_ITEMS);
        push_filter(&mut qb, filter);
        qb.push(" ORDER BY seq ASC OFFSET ")
            .push_bind(clamp_i64(skip))
            .push(" LIMIT ")
            .push_bind(clamp_i64(limit));

        let rows = qb
            .build()
            .fetch_all(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("find", e))?;

        rows.iter().map(row_to_item).collect()
    }

    #[instrument(skip(self), fields(item_id = %id), err)]
    async fn find_one_by_id(&self, id: ItemId) -> Result<Option<Item>, StoreError> {
        let mut qb = QueryBuilder::<Postgres>::new(SELECT_ITEMS);
        qb.push("id = ").push_bind(*id.as_uuid());

        let row = qb
            .build()
            .fetch_optional(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("find_one_by_id", e))?;

        row.as_ref().map(row_to_item).transpose()
    }

    #[instrument(skip(self, item), fields(owner_id = %item.owner_id), err)]
    async fn insert_one(&self, item: NewItem) -> Result<ItemId, StoreError> {
        self.insert_row(&item).await
    }

    #[instrument(skip(self, items), fields(batch = items.len()), err)]
    async fn insert_many(&self, items: Vec<NewItem>) -> Result<BatchInsert, StoreError> {
        let mut outcome = BatchInsert::default();

        for (index, new) in items.iter().enumerate() {
            match self.insert_row(new).await {
                Ok(id) => outcome.inserted.push(id),
                Err(StoreError::Rejected(reason)) => {
                    outcome.rejected.push(RejectedDocument { index, reason });
                }
                Err(e @ StoreError::Unavailable(_)) => {
                    if outcome.inserted.is_empty() {
                        return Err(e);
                    }
                    // Keep what was written; the rest of the batch never made it.
                    tracing::warn!(index, "batch insert interrupted: {e}");
                    let reason = e.to_string();
                    outcome.rejected.extend((index..items.len()).map(|index| RejectedDocument {
                        index,
                        reason: reason.clone(),
                    }));
                    break;
                }
            }
        }

        Ok(outcome)
    }

    #[instrument(skip(self, patch), fields(item_id = %id), err)]
    async fn update_one_by_id(&self, id: ItemId, patch: &ItemPatch) -> Result<UpdateOutcome, StoreError> {
        let row = sqlx::query(
            r#"
            WITH target AS (
                SELECT id FROM inventory_items WHERE id = $1
            ),
            changed AS (
                UPDATE inventory_items
                SET
                    description = $2::text,
                    drawing = $3::text,
                    quantity = $4::bigint,
                    status = $5::text,
                    owner_id = $6::text,
                    updated_at = $7::timestamptz
                WHERE id = $1
                  AND (description, drawing, quantity, status, owner_id, updated_at)
                      IS DISTINCT FROM ($2::text, $3::text, $4::bigint, $5::text, $6::text, $7::timestamptz)
                RETURNING id
            )
            SELECT
                (SELECT COUNT(*) FROM target) AS matched,
                (SELECT COUNT(*) FROM changed) AS modified
            "#,
        )
        .bind(id.as_uuid())
        .bind(&patch.description)
        .bind(&patch.drawing)
        .bind(patch.quantity)
        .bind(patch.status.as_str())
        .bind(patch.owner_id.as_str())
        .bind(patch.updated_at)
        .fetch_one(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("update_one_by_id", e))?;

        let matched: i64 = row.try_get("matched").map_err(|e| map_sqlx_error("update_one_by_id", e))?;
        let modified: i64 = row.try_get("modified").map_err(|e| map_sqlx_error("update_one_by_id", e))?;

        Ok(UpdateOutcome {
            matched: matched > 0,
            modified: modified > 0,
        })
    }

    #[instrument(skip(self), fields(item_id = %id), err)]
    async fn delete_one_by_id(&self, id: ItemId) -> Result<u64, StoreError> {
        let result = sqlx::query("DELETE FROM inventory_items WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("delete_one_by_id", e))?;

        Ok(result.rows_affected())
    }

    #[instrument(skip(self), err)]
    async fn delete_many(&self, filter: &ItemFilter) -> Result<u64, StoreError> {
        let mut qb = QueryBuilder::<Postgres>::new("DELETE FROM inventory_items WHERE ");
        push_filter(&mut qb, filter);

        let result = qb
            .build()
            .execute(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("delete_many", e))?;

        Ok(result.rows_affected())
    }
}

/// Append the SQL form of `filter` to `qb`.
pub(crate) fn push_filter(qb: &mut QueryBuilder<'_, Postgres>, filter: &ItemFilter) {
    match filter {
        ItemFilter::All => {
            qb.push("TRUE");
        }
        ItemFilter::OwnerIs(owner_id) => {
            qb.push("owner_id = ").push_bind(owner_id.as_str().to_string());
        }
        ItemFilter::Contains { field, term } => {
            qb.push(field.column())
                .push(" ILIKE ")
                .push_bind(like_pattern(term));
        }
        ItemFilter::UpdatedBefore(cutoff) => {
            qb.push("updated_at < ").push_bind(*cutoff);
        }
        ItemFilter::And(parts) => push_group(qb, parts, " AND ", "TRUE"),
        ItemFilter::Or(parts) => push_group(qb, parts, " OR ", "FALSE"),
    }
}

fn push_group(qb: &mut QueryBuilder<'_, Postgres>, parts: &[ItemFilter], joiner: &str, empty: &str) {
    if parts.is_empty() {
        qb.push(empty);
        return;
    }

    qb.push("(");
    for (idx, part) in parts.iter().enumerate() {
        if idx > 0 {
            qb.push(joiner);
        }
        push_filter(qb, part);
    }
    qb.push(")");
}

fn clamp_i64(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

fn row_to_item(row: &PgRow) -> Result<Item, StoreError> {
    let decode = |e| map_sqlx_error("decode", e);

    let status: String = row.try_get("status").map_err(decode)?;
    let status = status
        .parse::<ItemStatus>()
        .map_err(|e| StoreError::Unavailable(format!("decode status: {e}")))?;
    let owner_id: String = row.try_get("owner_id").map_err(decode)?;
    let updated_at: Option<DateTime<Utc>> = row.try_get("updated_at").map_err(decode)?;

    Ok(Item {
        id: ItemId::from_uuid(row.try_get::<uuid::Uuid, _>("id").map_err(decode)?),
        name: row.try_get("name").map_err(decode)?,
        description: row.try_get("description").map_err(decode)?,
        drawing: row.try_get("drawing").map_err(decode)?,
        quantity: row.try_get("quantity").map_err(decode)?,
        status,
        owner_id: OwnerId::new(owner_id),
        updated_at,
    })
}

/// Map SQLx errors to `StoreError`.
pub(crate) fn map_sqlx_error(operation: &str, err: sqlx::Error) -> StoreError {
    match err {
        sqlx::Error::Database(db_err) => {
            let msg = format!("database error in {}: {}", operation, db_err.message());
            match db_err.code().as_deref() {
                // check_violation / not_null_violation
                Some("23514") | Some("23502") => StoreError::Rejected(msg),
                _ => StoreError::Unavailable(msg),
            }
        }
        sqlx::Error::PoolClosed => {
            StoreError::Unavailable(format!("connection pool closed in {}", operation))
        }
        sqlx::Error::PoolTimedOut => {
            StoreError::Unavailable(format!("connection pool timed out in {}", operation))
        }
        _ => StoreError::Unavailable(format!("sqlx error in {}: {}", operation, err)),
    }
}
