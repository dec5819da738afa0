//! Template repository

use crate::domain::Template;
use crate::error::{AppError, Result};
use async_trait::async_trait;
use sqlx::MySqlPool;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TemplateRepository: Send + Sync {
    async fn create(&self, name: &str) -> Result<Template>;
    async fn find_by_id(&self, id: i64) -> Result<Option<Template>>;
    async fn list(&self) -> Result<Vec<Template>>;
    async fn update(&self, id: i64, name: &str) -> Result<Template>;
    async fn delete(&self, id: i64) -> Result<()>;
}

pub struct TemplateRepositoryImpl {
    pool: MySqlPool,
}

impl TemplateRepositoryImpl {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TemplateRepository for TemplateRepositoryImpl {
    async fn create(&self, name: &str) -> Result<Template> {
        let result =
            sqlx::query("INSERT INTO templates (name, created_at, updated_at) VALUES (?, NOW(), NOW())")
                .bind(name)
                .execute(&self.pool)
                .await?;

        self.find_by_id(result.last_insert_id() as i64)
            .await?
            .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Failed to create template")))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Template>> {
        let template = sqlx::query_as::<_, Template>(
            "SELECT id, name, created_at, updated_at FROM templates WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(template)
    }

    async fn list(&self) -> Result<Vec<Template>> {
        let templates = sqlx::query_as::<_, Template>(
            "SELECT id, name, created_at, updated_at FROM templates ORDER BY created_at DESC, id DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(templates)
    }

    async fn update(&self, id: i64, name: &str) -> Result<Template> {
        let result = sqlx::query("UPDATE templates SET name = ?, updated_at = NOW() WHERE id = ?")
            .bind(name)
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Template {} not found", id)));
        }

        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Failed to update template")))
    }

    async fn delete(&self, id: i64) -> Result<()> {
        let result = sqlx::query("DELETE FROM templates WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Template {} not found", id)));
        }

        Ok(())
    }
}
