//! Course module repository

use crate::domain::{CourseModule, CreateModuleInput, UpdateModuleInput};
use crate::error::{AppError, Result};
use async_trait::async_trait;
use sqlx::MySqlPool;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ModuleRepository: Send + Sync {
    async fn create(&self, input: &CreateModuleInput) -> Result<CourseModule>;
    async fn find_by_id(&self, id: i64) -> Result<Option<CourseModule>>;
    async fn list(&self) -> Result<Vec<CourseModule>>;
    /// Modules of a course ordered by position
    async fn list_by_course(&self, course_id: i64) -> Result<Vec<CourseModule>>;
    async fn update(&self, id: i64, input: &UpdateModuleInput) -> Result<CourseModule>;
    async fn delete(&self, id: i64) -> Result<()>;
}

pub struct ModuleRepositoryImpl {
    pool: MySqlPool,
}

impl ModuleRepositoryImpl {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ModuleRepository for ModuleRepositoryImpl {
    async fn create(&self, input: &CreateModuleInput) -> Result<CourseModule> {
        let result = sqlx::query(
            r#"
            INSERT INTO modules (title, position, course_id, created_at, updated_at)
            VALUES (?, ?, ?, NOW(), NOW())
            "#,
        )
        .bind(&input.title)
        .bind(input.position)
        .bind(input.course_id)
        .execute(&self.pool)
        .await?;

        self.find_by_id(result.last_insert_id() as i64)
            .await?
            .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Failed to create module")))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<CourseModule>> {
        let module = sqlx::query_as::<_, CourseModule>(
            r#"
            SELECT id, title, position, course_id, created_at, updated_at
            FROM modules
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(module)
    }

    async fn list(&self) -> Result<Vec<CourseModule>> {
        let modules = sqlx::query_as::<_, CourseModule>(
            r#"
            SELECT id, title, position, course_id, created_at, updated_at
            FROM modules
            ORDER BY course_id, position, id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(modules)
    }

    async fn list_by_course(&self, course_id: i64) -> Result<Vec<CourseModule>> {
        let modules = sqlx::query_as::<_, CourseModule>(
            r#"
            SELECT id, title, position, course_id, created_at, updated_at
            FROM modules
            WHERE course_id = ?
            ORDER BY position, id
            "#,
        )
        .bind(course_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(modules)
    }

    async fn update(&self, id: i64, input: &UpdateModuleInput) -> Result<CourseModule> {
        let existing = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Module {} not found", id)))?;

        sqlx::query(
            r#"
            UPDATE modules
            SET title = ?, position = ?, course_id = ?, updated_at = NOW()
            WHERE id = ?
            "#,
        )
        .bind(input.title.as_ref().unwrap_or(&existing.title))
        .bind(input.position.unwrap_or(existing.position))
        .bind(input.course_id.unwrap_or(existing.course_id))
        .bind(id)
        .execute(&self.pool)
        .await?;

        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Failed to update module")))
    }

    async fn delete(&self, id: i64) -> Result<()> {
        let result = sqlx::query("DELETE FROM modules WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Module {} not found", id)));
        }

        Ok(())
    }
}
