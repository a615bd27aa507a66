//! SQLite-backed [`NameStore`].
//!
//! One row per normalized name in the `names` table. The gender estimate
//! and the nationality list are stored as JSON text using the same field
//! names the inference services return. Rows are ordered by
//! `looked_up_at`, with `rowid` as a tie-breaker; `INSERT OR REPLACE`
//! assigns a fresh rowid, so a re-inserted name moves to the end.

use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use tokio::sync::{watch, Mutex};

use crate::config::Config;
use crate::db;
use crate::migrate;
use crate::models::{CountryProbability, GenderInfo, NameRecord};

use super::{NameStore, Snapshots};

pub struct SqliteNameStore {
    pool: SqlitePool,
    snapshots: Snapshots,
    /// Held across a write and the reload that publishes it.
    writes: Mutex<()>,
}

impl SqliteNameStore {
    /// Connect to the configured database, apply the schema and load the
    /// initial snapshot.
    pub async fn open(config: &Config) -> Result<Self> {
        let pool = db::connect(config).await?;
        migrate::apply_schema(&pool).await?;
        Self::new(pool).await
    }

    /// Wrap an existing pool. The schema must already be applied.
    pub async fn new(pool: SqlitePool) -> Result<Self> {
        let initial = load_all(&pool).await?;
        Ok(Self {
            pool,
            snapshots: Snapshots::new(initial),
            writes: Mutex::new(()),
        })
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }

    async fn republish(&self) -> Result<()> {
        let records = load_all(&self.pool).await?;
        self.snapshots.publish(records);
        Ok(())
    }
}

async fn load_all(pool: &SqlitePool) -> Result<Vec<NameRecord>> {
    let rows = sqlx::query(
        "SELECT name, age, gender_json, nationality_json FROM names ORDER BY looked_up_at ASC, rowid ASC",
    )
    .fetch_all(pool)
    .await?;

    rows.iter().map(row_to_record).collect()
}

fn row_to_record(row: &SqliteRow) -> Result<NameRecord> {
    let name: String = row.get("name");
    let gender_json: Option<String> = row.get("gender_json");
    let nationality_json: String = row.get("nationality_json");

    let gender = gender_json
        .map(|json| serde_json::from_str::<GenderInfo>(&json))
        .transpose()
        .with_context(|| format!("corrupt gender_json for '{}'", name))?;

    let nationality: Vec<CountryProbability> = serde_json::from_str(&nationality_json)
        .with_context(|| format!("corrupt nationality_json for '{}'", name))?;

    Ok(NameRecord {
        age: row.get("age"),
        name,
        gender,
        nationality,
    })
}

#[async_trait]
impl NameStore for SqliteNameStore {
    async fn get_all(&self) -> Result<Vec<NameRecord>> {
        load_all(&self.pool).await
    }

    async fn get(&self, name: &str) -> Result<Option<NameRecord>> {
        let row = sqlx::query(
            "SELECT name, age, gender_json, nationality_json FROM names WHERE name = ?",
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(row_to_record).transpose()
    }

    async fn upsert(&self, record: &NameRecord) -> Result<()> {
        let gender_json = record
            .gender
            .as_ref()
            .map(serde_json::to_string)
            .transpose()?;
        let nationality_json = serde_json::to_string(&record.nationality)?;

        let _guard = self.writes.lock().await;
        let now = chrono::Utc::now().timestamp_millis();
        sqlx::query(
            r#"
            INSERT OR REPLACE INTO names (name, age, gender_json, nationality_json, looked_up_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&record.name)
        .bind(record.age)
        .bind(&gender_json)
        .bind(&nationality_json)
        .bind(now)
        .execute(&self.pool)
        .await
        .with_context(|| format!("failed to store '{}'", record.name))?;

        self.republish().await
    }

    async fn delete(&self, record: &NameRecord) -> Result<()> {
        let _guard = self.writes.lock().await;
        let result = sqlx::query("DELETE FROM names WHERE name = ?")
            .bind(&record.name)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() > 0 {
            self.republish().await?;
        }
        Ok(())
    }

    fn subscribe(&self) -> watch::Receiver<Vec<NameRecord>> {
        self.snapshots.subscribe()
    }
}
