//! Quiz attempt repository

use crate::domain::{AttemptStatus, NewUserQuizAnswer, QuizAttempt};
use crate::error::{AppError, Result};
use async_trait::async_trait;
use sqlx::MySqlPool;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AttemptRepository: Send + Sync {
    /// Opens an attempt in `IN_PROGRESS`
    async fn create(&self, user_id: i64, quiz_id: i64) -> Result<QuizAttempt>;
    async fn record_answers(&self, attempt_id: i64, answers: &[NewUserQuizAnswer]) -> Result<()>;
    /// Marks the attempt `COMPLETED` with its score
    async fn complete(&self, attempt_id: i64, score: f64) -> Result<QuizAttempt>;
    async fn list_by_user_and_quiz(&self, user_id: i64, quiz_id: i64)
        -> Result<Vec<QuizAttempt>>;
}

pub struct AttemptRepositoryImpl {
    pool: MySqlPool,
}

impl AttemptRepositoryImpl {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<QuizAttempt>> {
        let attempt = sqlx::query_as::<_, QuizAttempt>(
            r#"
            SELECT id, user_id, quiz_id, status, score, started_at, completed_at
            FROM user_quiz_attempts
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(attempt)
    }
}

#[async_trait]
impl AttemptRepository for AttemptRepositoryImpl {
    async fn create(&self, user_id: i64, quiz_id: i64) -> Result<QuizAttempt> {
        let result = sqlx::query(
            r#"
            INSERT INTO user_quiz_attempts (user_id, quiz_id, status, started_at)
            VALUES (?, ?, ?, NOW())
            "#,
        )
        .bind(user_id)
        .bind(quiz_id)
        .bind(AttemptStatus::InProgress)
        .execute(&self.pool)
        .await?;

        self.find_by_id(result.last_insert_id() as i64)
            .await?
            .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Failed to create quiz attempt")))
    }

    async fn record_answers(&self, attempt_id: i64, answers: &[NewUserQuizAnswer]) -> Result<()> {
        let mut tx = self.pool.begin().await?;
        for answer in answers {
            sqlx::query(
                r#"
                INSERT INTO user_quiz_answers (attempt_id, question_id, answer_id, is_correct, answered_at)
                VALUES (?, ?, ?, ?, ?)
                "#,
            )
            .bind(attempt_id)
            .bind(answer.question_id)
            .bind(answer.answer_id)
            .bind(answer.is_correct)
            .bind(answer.answered_at)
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await?;
        Ok(())
    }

    async fn complete(&self, attempt_id: i64, score: f64) -> Result<QuizAttempt> {
        let result = sqlx::query(
            r#"
            UPDATE user_quiz_attempts
            SET status = ?, score = ?, completed_at = NOW()
            WHERE id = ?
            "#,
        )
        .bind(AttemptStatus::Completed)
        .bind(score)
        .bind(attempt_id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "Quiz attempt {} not found",
                attempt_id
            )));
        }

        self.find_by_id(attempt_id)
            .await?
            .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Failed to complete quiz attempt")))
    }

    async fn list_by_user_and_quiz(
        &self,
        user_id: i64,
        quiz_id: i64,
    ) -> Result<Vec<QuizAttempt>> {
        let attempts = sqlx::query_as::<_, QuizAttempt>(
            r#"
            SELECT id, user_id, quiz_id, status, score, started_at, completed_at
            FROM user_quiz_attempts
            WHERE user_id = ? AND quiz_id = ?
            ORDER BY started_at DESC, id DESC
            "#,
        )
        .bind(user_id)
        .bind(quiz_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(attempts)
    }
}
