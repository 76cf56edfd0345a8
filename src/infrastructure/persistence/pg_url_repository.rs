//! PostgreSQL implementation of the short code repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{NewShortenedUrl, ShortenedUrl};
use crate::domain::repositories::UrlRepository;
use crate::error::StoreError;

#[derive(sqlx::FromRow)]
struct ShortenedUrlRow {
    short_code: String,
    original_url: String,
    created_at: DateTime<Utc>,
}

impl From<ShortenedUrlRow> for ShortenedUrl {
    fn from(row: ShortenedUrlRow) -> Self {
        ShortenedUrl::new(row.short_code, row.original_url, row.created_at)
    }
}

/// PostgreSQL repository for short code mappings.
///
/// Relies on the `UNIQUE` constraint on `shortened_url.short_code`; an insert
/// that loses a race surfaces as [`StoreError::UniqueViolation`].
pub struct PgUrlRepository {
    pool: Arc<PgPool>,
}

impl PgUrlRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UrlRepository for PgUrlRepository {
    async fn insert(&self, new_url: NewShortenedUrl) -> Result<ShortenedUrl, StoreError> {
        let row = sqlx::query_as::<_, ShortenedUrlRow>(
            r#"
            INSERT INTO shortened_url (short_code, original_url)
            VALUES ($1, $2)
            RETURNING short_code, original_url, created_at
            "#,
        )
        .bind(&new_url.short_code)
        .bind(&new_url.original_url)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(row.into())
    }

    async fn find_original_url(&self, short_code: &str) -> Result<Option<String>, StoreError> {
        let url = sqlx::query_scalar::<_, String>(
            r#"
            SELECT original_url
            FROM shortened_url
            WHERE short_code = $1
            "#,
        )
        .bind(short_code)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(url)
    }

    async fn list_all(&self) -> Result<Vec<ShortenedUrl>, StoreError> {
        let rows = sqlx::query_as::<_, ShortenedUrlRow>(
            r#"
            SELECT short_code, original_url, created_at
            FROM shortened_url
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(ShortenedUrl::from).collect())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1")
            .execute(self.pool.as_ref())
            .await?;

        Ok(())
    }
}
