//! Cart and wishlist membership repository

use super::{is_unique_violation, InsertOutcome};
use crate::domain::{Course, SavedCourse, SavedListKind};
use crate::error::{AppError, Result};
use async_trait::async_trait;
use sqlx::MySqlPool;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SavedCourseRepository: Send + Sync {
    /// Adds the course to the list; an existing pair yields `AlreadyExists`
    async fn add(
        &self,
        kind: SavedListKind,
        user_id: i64,
        course_id: i64,
    ) -> Result<InsertOutcome<SavedCourse>>;
    async fn list_courses(&self, kind: SavedListKind, user_id: i64) -> Result<Vec<Course>>;
    async fn remove(&self, kind: SavedListKind, user_id: i64, course_id: i64) -> Result<()>;
}

pub struct SavedCourseRepositoryImpl {
    pool: MySqlPool,
}

impl SavedCourseRepositoryImpl {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

// Table names come from `SavedListKind::table`, never from input.
#[async_trait]
impl SavedCourseRepository for SavedCourseRepositoryImpl {
    async fn add(
        &self,
        kind: SavedListKind,
        user_id: i64,
        course_id: i64,
    ) -> Result<InsertOutcome<SavedCourse>> {
        let insert = format!(
            "INSERT INTO {} (user_id, course_id, created_at) VALUES (?, ?, NOW())",
            kind.table()
        );
        let result = sqlx::query(&insert)
            .bind(user_id)
            .bind(course_id)
            .execute(&self.pool)
            .await;

        let id = match result {
            Ok(done) => done.last_insert_id() as i64,
            Err(e) if is_unique_violation(&e) => return Ok(InsertOutcome::AlreadyExists),
            Err(e) => return Err(e.into()),
        };

        let select = format!(
            "SELECT id, user_id, course_id, created_at FROM {} WHERE id = ?",
            kind.table()
        );
        let saved = sqlx::query_as::<_, SavedCourse>(&select)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| {
                AppError::Internal(anyhow::anyhow!("Failed to add course to {}", kind.label()))
            })?;

        Ok(InsertOutcome::Created(saved))
    }

    async fn list_courses(&self, kind: SavedListKind, user_id: i64) -> Result<Vec<Course>> {
        let sql = format!(
            r#"
            SELECT c.id, c.title, c.description, c.price, c.level, c.language, c.duration,
                   c.requirements, c.learning_outcomes, c.category_id, c.instructor_id,
                   c.created_at, c.updated_at
            FROM {} s
            JOIN courses c ON c.id = s.course_id
            WHERE s.user_id = ?
            ORDER BY s.created_at DESC, s.id DESC
            "#,
            kind.table()
        );
        let courses = sqlx::query_as::<_, Course>(&sql)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(courses)
    }

    async fn remove(&self, kind: SavedListKind, user_id: i64, course_id: i64) -> Result<()> {
        let sql = format!(
            "DELETE FROM {} WHERE user_id = ? AND course_id = ?",
            kind.table()
        );
        let result = sqlx::query(&sql)
            .bind(user_id)
            .bind(course_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "Course {} is not in your {}",
                course_id,
                kind.label()
            )));
        }

        Ok(())
    }
}
