//! PostgreSQL implementation of link repository.

use async_trait::async_trait;
use serde_json::json;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{Link, NewLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;

const LINK_COLUMNS: &str = "id, universal_link, deep_link, ios_store, android_store, \
     title, description, created_at, updated_at, click_count";

/// PostgreSQL repository for link storage and click counters.
///
/// Queries are bound parameters checked at runtime, so the crate builds
/// without a live database.
pub struct PgLinkRepository {
    pool: Arc<PgPool>,
}

impl PgLinkRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LinkRepository for PgLinkRepository {
    async fn create(&self, new_link: NewLink) -> Result<Link, AppError> {
        let query = format!(
            r#"
            INSERT INTO links (id, universal_link, deep_link, ios_store, android_store,
                               title, description, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $8)
            RETURNING {LINK_COLUMNS}
            "#
        );

        let link = sqlx::query_as::<_, Link>(&query)
            .bind(&new_link.id)
            .bind(&new_link.universal_link)
            .bind(&new_link.deep_link)
            .bind(&new_link.ios_store)
            .bind(&new_link.android_store)
            .bind(&new_link.title)
            .bind(&new_link.description)
            .bind(new_link.created_at)
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(link)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Link>, AppError> {
        let query = format!("SELECT {LINK_COLUMNS} FROM links WHERE id = $1");

        let link = sqlx::query_as::<_, Link>(&query)
            .bind(id)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(link)
    }

    async fn increment_click(&self, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("UPDATE links SET click_count = click_count + 1 WHERE id = $1")
            .bind(id)
            .execute(self.pool.as_ref())
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("Link not found", json!({ "id": id })));
        }

        Ok(())
    }

    async fn list(&self) -> Result<Vec<Link>, AppError> {
        let query = format!("SELECT {LINK_COLUMNS} FROM links ORDER BY created_at DESC, id");

        let links = sqlx::query_as::<_, Link>(&query)
            .fetch_all(self.pool.as_ref())
            .await?;

        Ok(links)
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1")
            .execute(self.pool.as_ref())
            .await?;

        Ok(())
    }
}
