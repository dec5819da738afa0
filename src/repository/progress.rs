//! Per-user content and module progress repository

use super::{is_unique_violation, InsertOutcome};
use crate::domain::{UserContentProgress, UserModuleProgress};
use crate::error::{AppError, Result};
use async_trait::async_trait;
use sqlx::MySqlPool;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProgressRepository: Send + Sync {
    /// Records a completed content; a second call for the pair yields `AlreadyExists`
    async fn create_content_progress(
        &self,
        user_id: i64,
        content_id: i64,
    ) -> Result<InsertOutcome<UserContentProgress>>;
    /// Records a completed module at 100%; a second call for the pair yields `AlreadyExists`
    async fn create_module_progress(
        &self,
        user_id: i64,
        module_id: i64,
    ) -> Result<InsertOutcome<UserModuleProgress>>;
    /// The user's progress rows for contents of a module
    async fn list_content_progress_in_module(
        &self,
        user_id: i64,
        module_id: i64,
    ) -> Result<Vec<UserContentProgress>>;
    /// The user's progress rows for modules of a course
    async fn list_module_progress_in_course(
        &self,
        user_id: i64,
        course_id: i64,
    ) -> Result<Vec<UserModuleProgress>>;
}

pub struct ProgressRepositoryImpl {
    pool: MySqlPool,
}

impl ProgressRepositoryImpl {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProgressRepository for ProgressRepositoryImpl {
    async fn create_content_progress(
        &self,
        user_id: i64,
        content_id: i64,
    ) -> Result<InsertOutcome<UserContentProgress>> {
        let result = sqlx::query(
            r#"
            INSERT INTO user_content_progress (user_id, content_id, is_completed, updated_at)
            VALUES (?, ?, TRUE, NOW())
            "#,
        )
        .bind(user_id)
        .bind(content_id)
        .execute(&self.pool)
        .await;

        let id = match result {
            Ok(done) => done.last_insert_id() as i64,
            Err(e) if is_unique_violation(&e) => return Ok(InsertOutcome::AlreadyExists),
            Err(e) => return Err(e.into()),
        };

        let progress = sqlx::query_as::<_, UserContentProgress>(
            "SELECT id, user_id, content_id, is_completed, updated_at FROM user_content_progress WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Failed to record content progress")))?;

        Ok(InsertOutcome::Created(progress))
    }

    async fn create_module_progress(
        &self,
        user_id: i64,
        module_id: i64,
    ) -> Result<InsertOutcome<UserModuleProgress>> {
        let result = sqlx::query(
            r#"
            INSERT INTO user_module_progress (user_id, module_id, is_completed, progress_percentage, updated_at)
            VALUES (?, ?, TRUE, 100, NOW())
            "#,
        )
        .bind(user_id)
        .bind(module_id)
        .execute(&self.pool)
        .await;

        let id = match result {
            Ok(done) => done.last_insert_id() as i64,
            Err(e) if is_unique_violation(&e) => return Ok(InsertOutcome::AlreadyExists),
            Err(e) => return Err(e.into()),
        };

        let progress = sqlx::query_as::<_, UserModuleProgress>(
            r#"
            SELECT id, user_id, module_id, is_completed, progress_percentage, updated_at
            FROM user_module_progress
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Failed to record module progress")))?;

        Ok(InsertOutcome::Created(progress))
    }

    async fn list_content_progress_in_module(
        &self,
        user_id: i64,
        module_id: i64,
    ) -> Result<Vec<UserContentProgress>> {
        let rows = sqlx::query_as::<_, UserContentProgress>(
            r#"
            SELECT p.id, p.user_id, p.content_id, p.is_completed, p.updated_at
            FROM user_content_progress p
            JOIN contents c ON c.id = p.content_id
            WHERE p.user_id = ? AND c.module_id = ?
            "#,
        )
        .bind(user_id)
        .bind(module_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn list_module_progress_in_course(
        &self,
        user_id: i64,
        course_id: i64,
    ) -> Result<Vec<UserModuleProgress>> {
        let rows = sqlx::query_as::<_, UserModuleProgress>(
            r#"
            SELECT p.id, p.user_id, p.module_id, p.is_completed, p.progress_percentage, p.updated_at
            FROM user_module_progress p
            JOIN modules m ON m.id = p.module_id
            WHERE p.user_id = ? AND m.course_id = ?
            "#,
        )
        .bind(user_id)
        .bind(course_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}
