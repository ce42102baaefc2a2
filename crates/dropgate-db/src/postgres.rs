//! Postgres-backed link registry: CRUD for the short_links table.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dropgate_core::models::LinkEntry;
use dropgate_core::AppError;
use sqlx::{PgPool, Postgres};

use crate::registry::LinkRegistry;

/// Row type for the short_links table (for FromRow).
#[derive(Debug, sqlx::FromRow)]
struct LinkRow {
    id: String,
    bucket: String,
    object_key: String,
    expires_at: DateTime<Utc>,
}

impl LinkRow {
    fn to_entry(self) -> LinkEntry {
        LinkEntry {
            id: self.id,
            bucket: self.bucket,
            object_key: self.object_key,
            expires_at: self.expires_at,
        }
    }
}

/// Run pending migrations for the short_links schema.
pub async fn run_migrations(pool: &PgPool) -> Result<(), anyhow::Error> {
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}

/// Postgres registry backend.
#[derive(Clone)]
pub struct PgLinkRegistry {
    pool: PgPool,
}

impl PgLinkRegistry {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LinkRegistry for PgLinkRegistry {
    #[tracing::instrument(skip(self, entry), fields(db.table = "short_links", link_id = %entry.id))]
    async fn insert(&self, entry: &LinkEntry) -> Result<(), AppError> {
        let result = sqlx::query(
            r#"
            INSERT INTO short_links (id, bucket, object_key, expires_at)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(&entry.id)
        .bind(&entry.bucket)
        .bind(&entry.object_key)
        .bind(entry.expires_at)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(()),
            // Primary-key violation: another writer claimed this id first.
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                Err(AppError::DuplicateId(entry.id.clone()))
            }
            Err(e) => Err(AppError::Database(e)),
        }
    }

    #[tracing::instrument(skip(self), fields(db.table = "short_links", link_id = %id))]
    async fn get(&self, id: &str) -> Result<Option<LinkEntry>, AppError> {
        let row: Option<LinkRow> = sqlx::query_as::<Postgres, LinkRow>(
            "SELECT id, bucket, object_key, expires_at FROM short_links WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(|r| r.to_entry()))
    }

    #[tracing::instrument(skip(self), fields(db.table = "short_links", link_id = %id))]
    async fn delete(&self, id: &str) -> Result<(), AppError> {
        sqlx::query("DELETE FROM short_links WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    #[tracing::instrument(skip(self), fields(db.table = "short_links", limit))]
    async fn expired(&self, now: DateTime<Utc>, limit: i64) -> Result<Vec<LinkEntry>, AppError> {
        let rows: Vec<LinkRow> = sqlx::query_as::<Postgres, LinkRow>(
            r#"
            SELECT id, bucket, object_key, expires_at
            FROM short_links
            WHERE expires_at <= $1
            ORDER BY expires_at
            LIMIT $2
            "#,
        )
        .bind(now)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(|r| r.to_entry()).collect())
    }
}
