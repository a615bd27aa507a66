//! Schema migrations for the name cache.
//!
//! There is a single table, `names`, keyed by the normalized name. The
//! nested parts of a record are stored as JSON text. The schema version is
//! kept in `PRAGMA user_version`.

use anyhow::{bail, Result};
use sqlx::SqlitePool;

use crate::config::Config;
use crate::db;

/// Current schema version written to `PRAGMA user_version`.
pub const SCHEMA_VERSION: i64 = 1;

/// Open the configured database, apply the schema and close the pool.
pub async fn run_migrations(config: &Config) -> Result<()> {
    let pool = db::connect(config).await?;
    let result = apply_schema(&pool).await;
    pool.close().await;
    result
}

/// Create the `names` table if needed. Idempotent.
pub async fn apply_schema(pool: &SqlitePool) -> Result<()> {
    let version: i64 = sqlx::query_scalar("PRAGMA user_version")
        .fetch_one(pool)
        .await?;

    if version > SCHEMA_VERSION {
        bail!(
            "database schema version {} is newer than supported version {}",
            version,
            SCHEMA_VERSION
        );
    }

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS names (
            name TEXT PRIMARY KEY NOT NULL,
            age INTEGER NOT NULL DEFAULT 0,
            gender_json TEXT,
            nationality_json TEXT NOT NULL DEFAULT '[]',
            looked_up_at INTEGER NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_names_looked_up_at ON names(looked_up_at)")
        .execute(pool)
        .await?;

    if version < SCHEMA_VERSION {
        sqlx::query(&format!("PRAGMA user_version = {}", SCHEMA_VERSION))
            .execute(pool)
            .await?;
    }

    Ok(())
}
