//! Content repository

use crate::domain::{Content, CreateContentInput, UpdateContentInput};
use crate::error::{AppError, Result};
use async_trait::async_trait;
use sqlx::MySqlPool;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContentRepository: Send + Sync {
    async fn create(&self, input: &CreateContentInput) -> Result<Content>;
    async fn find_by_id(&self, id: i64) -> Result<Option<Content>>;
    async fn list(&self) -> Result<Vec<Content>>;
    /// Contents of a module ordered by position
    async fn list_by_module(&self, module_id: i64) -> Result<Vec<Content>>;
    async fn update(&self, id: i64, input: &UpdateContentInput) -> Result<Content>;
    async fn delete(&self, id: i64) -> Result<()>;
}

pub struct ContentRepositoryImpl {
    pool: MySqlPool,
}

impl ContentRepositoryImpl {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ContentRepository for ContentRepositoryImpl {
    async fn create(&self, input: &CreateContentInput) -> Result<Content> {
        let result = sqlx::query(
            r#"
            INSERT INTO contents (title, content_url, content_type, duration, position, module_id,
                                  created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, NOW(), NOW())
            "#,
        )
        .bind(&input.title)
        .bind(&input.content_url)
        .bind(input.content_type)
        .bind(&input.duration)
        .bind(input.position)
        .bind(input.module_id)
        .execute(&self.pool)
        .await?;

        self.find_by_id(result.last_insert_id() as i64)
            .await?
            .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Failed to create content")))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Content>> {
        let content = sqlx::query_as::<_, Content>(
            r#"
            SELECT id, title, content_url, content_type, duration, position, module_id,
                   created_at, updated_at
            FROM contents
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(content)
    }

    async fn list(&self) -> Result<Vec<Content>> {
        let contents = sqlx::query_as::<_, Content>(
            r#"
            SELECT id, title, content_url, content_type, duration, position, module_id,
                   created_at, updated_at
            FROM contents
            ORDER BY module_id, position, id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(contents)
    }

    async fn list_by_module(&self, module_id: i64) -> Result<Vec<Content>> {
        let contents = sqlx::query_as::<_, Content>(
            r#"
            SELECT id, title, content_url, content_type, duration, position, module_id,
                   created_at, updated_at
            FROM contents
            WHERE module_id = ?
            ORDER BY position, id
            "#,
        )
        .bind(module_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(contents)
    }

    async fn update(&self, id: i64, input: &UpdateContentInput) -> Result<Content> {
        let existing = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Content {} not found", id)))?;

        sqlx::query(
            r#"
            UPDATE contents
            SET title = ?, content_url = ?, content_type = ?, duration = ?, position = ?,
                module_id = ?, updated_at = NOW()
            WHERE id = ?
            "#,
        )
        .bind(input.title.as_ref().unwrap_or(&existing.title))
        .bind(input.content_url.as_ref().unwrap_or(&existing.content_url))
        .bind(input.content_type.unwrap_or(existing.content_type))
        .bind(input.duration.as_ref().unwrap_or(&existing.duration))
        .bind(input.position.unwrap_or(existing.position))
        .bind(input.module_id.unwrap_or(existing.module_id))
        .bind(id)
        .execute(&self.pool)
        .await?;

        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Failed to update content")))
    }

    async fn delete(&self, id: i64) -> Result<()> {
        let result = sqlx::query("DELETE FROM contents WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Content {} not found", id)));
        }

        Ok(())
    }
}
