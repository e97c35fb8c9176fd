//! Versioned schema migrations for the Postgres collection.
//!
//! The item shape grew across revisions: first name-keyed rows with no owner,
//! then owner and write-time columns, finally a required owner plus check
//! constraints. Each step is one `Migration`; applied versions are recorded in
//! `schema_migrations`, and each migration runs in its own transaction.

use sqlx::{PgPool, Row};
use tracing::{info, instrument};

use crate::store::postgres::map_sqlx_error;
use crate::store::StoreError;

/// Owner token assigned to rows written before items were owner-scoped.
pub const LEGACY_OWNER: &str = "legacy";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Migration {
    pub version: i64,
    pub description: &'static str,
    pub statements: &'static [&'static str],
}

pub const MIGRATIONS: &[Migration] = &[
    Migration {
        version: 1,
        description: "create inventory_items",
        statements: &[
            r#"
            CREATE TABLE inventory_items (
                id UUID PRIMARY KEY,
                seq BIGSERIAL NOT NULL,
                name TEXT NOT NULL,
                description TEXT NOT NULL DEFAULT '',
                drawing TEXT NOT NULL DEFAULT '',
                quantity BIGINT NOT NULL DEFAULT 0,
                status TEXT NOT NULL
            )
            "#,
            "CREATE UNIQUE INDEX inventory_items_seq_idx ON inventory_items (seq)",
        ],
    },
    Migration {
        version: 2,
        description: "add owner_id and updated_at",
        statements: &[
            "ALTER TABLE inventory_items ADD COLUMN owner_id TEXT",
            "ALTER TABLE inventory_items ADD COLUMN updated_at TIMESTAMPTZ",
            "CREATE INDEX inventory_items_owner_idx ON inventory_items (owner_id, seq)",
        ],
    },
    Migration {
        version: 3,
        description: "require owner_id and add item constraints",
        statements: &[
            "UPDATE inventory_items SET owner_id = 'legacy' WHERE owner_id IS NULL",
            "ALTER TABLE inventory_items ALTER COLUMN owner_id SET NOT NULL",
            "ALTER TABLE inventory_items ADD CONSTRAINT inventory_items_quantity_check CHECK (quantity >= 0)",
            "ALTER TABLE inventory_items ADD CONSTRAINT inventory_items_name_check CHECK (btrim(name) <> '')",
            "ALTER TABLE inventory_items ADD CONSTRAINT inventory_items_status_check CHECK (status IN ('Active', 'Unavailable', 'Slow'))",
            "CREATE INDEX inventory_items_updated_at_idx ON inventory_items (updated_at)",
        ],
    },
];

/// Migrations not yet recorded in `applied`, in version order.
pub fn pending<'a>(migrations: &'a [Migration], applied: &[i64]) -> Vec<&'a Migration> {
    let mut out: Vec<&Migration> = migrations
        .iter()
        .filter(|m| !applied.contains(&m.version))
        .collect();
    out.sort_by_key(|m| m.version);
    out
}

/// Bring the schema up to date. Returns the versions applied by this call.
#[instrument(skip(pool), err)]
pub async fn migrate(pool: &PgPool) -> Result<Vec<i64>, StoreError> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS schema_migrations (
            version BIGINT PRIMARY KEY,
            description TEXT NOT NULL,
            applied_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    )
    .execute(pool)
    .await
    .map_err(|e| map_sqlx_error("migrate", e))?;

    let applied: Vec<i64> = sqlx::query("SELECT version FROM schema_migrations")
        .fetch_all(pool)
        .await
        .map_err(|e| map_sqlx_error("migrate", e))?
        .iter()
        .map(|row| row.try_get::<i64, _>("version"))
        .collect::<Result<_, _>>()
        .map_err(|e| map_sqlx_error("migrate", e))?;

    let mut done = Vec::new();
    for migration in pending(MIGRATIONS, &applied) {
        let mut tx = pool.begin().await.map_err(|e| map_sqlx_error("migrate", e))?;

        for statement in migration.statements {
            sqlx::query(statement)
                .execute(&mut *tx)
                .await
                .map_err(|e| map_sqlx_error("migrate", e))?;
        }

        sqlx::query("INSERT INTO schema_migrations (version, description) VALUES ($1, $2)")
            .bind(migration.version)
            .bind(migration.description)
            .execute(&mut *tx)
            .await
            .map_err(|e| map_sqlx_error("migrate", e))?;

        tx.commit().await.map_err(|e| map_sqlx_error("migrate", e))?;

        info!(version = migration.version, "applied migration: {}", migration.description);
        done.push(migration.version);
    }

    Ok(done)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn versions_are_strictly_increasing() {
        for pair in MIGRATIONS.windows(2) {
            assert!(pair[0].version < pair[1].version);
        }
    }

    #[test]
    fn pending_skips_applied_versions() {
        let versions: Vec<i64> = pending(MIGRATIONS, &[1]).iter().map(|m| m.version).collect();
        assert_eq!(versions, vec![2, 3]);
        assert!(pending(MIGRATIONS, &[1, 2, 3]).is_empty());
    }

    #[test]
    fn legacy_rows_are_backfilled_before_owner_becomes_required() {
        let m = MIGRATIONS.iter().find(|m| m.version == 3).unwrap();
        let backfill = m.statements.iter().position(|s| s.contains(LEGACY_OWNER)).unwrap();
        let not_null = m.statements.iter().position(|s| s.contains("SET NOT NULL")).unwrap();
        assert!(backfill < not_null);
    }
}
