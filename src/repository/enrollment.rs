//! Enrollment and certificate repository

use super::{is_unique_violation, InsertOutcome};
use crate::domain::{Certificate, CreateEnrollmentInput, Enrollment};
use crate::error::{AppError, Result};
use async_trait::async_trait;
use sqlx::MySqlPool;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EnrollmentRepository: Send + Sync {
    /// Inserts an enrollment; an existing (user, course) pair yields `AlreadyExists`
    async fn create(&self, input: &CreateEnrollmentInput) -> Result<InsertOutcome<Enrollment>>;
    async fn find(&self, user_id: i64, course_id: i64) -> Result<Option<Enrollment>>;
    async fn list(&self) -> Result<Vec<Enrollment>>;
    async fn list_by_user(&self, user_id: i64) -> Result<Vec<Enrollment>>;
    /// Sets the enrollment to 100% and issues the certificate in one transaction.
    ///
    /// An already issued certificate yields `AlreadyExists` and leaves the
    /// enrollment untouched.
    async fn complete_course(
        &self,
        user_id: i64,
        course_id: i64,
        certificate_url: &str,
    ) -> Result<InsertOutcome<(Enrollment, Certificate)>>;
    async fn list_certificates(&self, user_id: i64) -> Result<Vec<Certificate>>;
}

pub struct EnrollmentRepositoryImpl {
    pool: MySqlPool,
}

impl EnrollmentRepositoryImpl {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Enrollment>> {
        let enrollment = sqlx::query_as::<_, Enrollment>(
            r#"
            SELECT id, user_id, course_id, progress_percentage, completed_at, access_expires_at, created_at
            FROM enrollments
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(enrollment)
    }
}

#[async_trait]
impl EnrollmentRepository for EnrollmentRepositoryImpl {
    async fn create(&self, input: &CreateEnrollmentInput) -> Result<InsertOutcome<Enrollment>> {
        let result = sqlx::query(
            r#"
            INSERT INTO enrollments (user_id, course_id, progress_percentage, completed_at,
                                     access_expires_at, created_at)
            VALUES (?, ?, ?, ?, ?, NOW())
            "#,
        )
        .bind(input.user_id)
        .bind(input.course_id)
        .bind(input.progress_percentage)
        .bind(input.completed_at)
        .bind(input.access_expires_at)
        .execute(&self.pool)
        .await;

        let id = match result {
            Ok(done) => done.last_insert_id() as i64,
            Err(e) if is_unique_violation(&e) => return Ok(InsertOutcome::AlreadyExists),
            Err(e) => return Err(e.into()),
        };

        let enrollment = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Failed to create enrollment")))?;
        Ok(InsertOutcome::Created(enrollment))
    }

    async fn find(&self, user_id: i64, course_id: i64) -> Result<Option<Enrollment>> {
        let enrollment = sqlx::query_as::<_, Enrollment>(
            r#"
            SELECT id, user_id, course_id, progress_percentage, completed_at, access_expires_at, created_at
            FROM enrollments
            WHERE user_id = ? AND course_id = ?
            "#,
        )
        .bind(user_id)
        .bind(course_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(enrollment)
    }

    async fn list(&self) -> Result<Vec<Enrollment>> {
        let enrollments = sqlx::query_as::<_, Enrollment>(
            r#"
            SELECT id, user_id, course_id, progress_percentage, completed_at, access_expires_at, created_at
            FROM enrollments
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(enrollments)
    }

    async fn list_by_user(&self, user_id: i64) -> Result<Vec<Enrollment>> {
        let enrollments = sqlx::query_as::<_, Enrollment>(
            r#"
            SELECT id, user_id, course_id, progress_percentage, completed_at, access_expires_at, created_at
            FROM enrollments
            WHERE user_id = ?
            ORDER BY id
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(enrollments)
    }

    async fn complete_course(
        &self,
        user_id: i64,
        course_id: i64,
        certificate_url: &str,
    ) -> Result<InsertOutcome<(Enrollment, Certificate)>> {
        let mut tx = self.pool.begin().await?;

        let updated = sqlx::query(
            r#"
            UPDATE enrollments
            SET progress_percentage = 100, completed_at = NOW()
            WHERE user_id = ? AND course_id = ?
            "#,
        )
        .bind(user_id)
        .bind(course_id)
        .execute(&mut *tx)
        .await?;

        if updated.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "Enrollment for course {} not found",
                course_id
            )));
        }

        let inserted = sqlx::query(
            r#"
            INSERT INTO certificates (user_id, course_id, certificate_url, issued_at)
            VALUES (?, ?, ?, NOW())
            "#,
        )
        .bind(user_id)
        .bind(course_id)
        .bind(certificate_url)
        .execute(&mut *tx)
        .await;

        let certificate_id = match inserted {
            Ok(done) => done.last_insert_id() as i64,
            // Dropping the transaction rolls back the enrollment update
            Err(e) if is_unique_violation(&e) => return Ok(InsertOutcome::AlreadyExists),
            Err(e) => return Err(e.into()),
        };

        let enrollment = sqlx::query_as::<_, Enrollment>(
            r#"
            SELECT id, user_id, course_id, progress_percentage, completed_at, access_expires_at, created_at
            FROM enrollments
            WHERE user_id = ? AND course_id = ?
            "#,
        )
        .bind(user_id)
        .bind(course_id)
        .fetch_one(&mut *tx)
        .await?;

        let certificate = sqlx::query_as::<_, Certificate>(
            "SELECT id, user_id, course_id, certificate_url, issued_at FROM certificates WHERE id = ?",
        )
        .bind(certificate_id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(InsertOutcome::Created((enrollment, certificate)))
    }

    async fn list_certificates(&self, user_id: i64) -> Result<Vec<Certificate>> {
        let certificates = sqlx::query_as::<_, Certificate>(
            r#"
            SELECT id, user_id, course_id, certificate_url, issued_at
            FROM certificates
            WHERE user_id = ?
            ORDER BY issued_at DESC, id DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(certificates)
    }
}
