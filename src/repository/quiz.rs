//! Quiz, question and answer-key repository

use super::{is_unique_violation, InsertOutcome};
use crate::domain::{
    CreateQuizInput, Question, QuestionInput, QuestionUpdateInput, QuestionWithAnswers, Quiz,
    QuizAnswer,
};
use crate::error::{AppError, Result};
use async_trait::async_trait;
use sqlx::{MySql, MySqlPool, Transaction};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuizRepository: Send + Sync {
    /// Inserts a quiz; a content that already has one yields `AlreadyExists`
    async fn create(&self, input: &CreateQuizInput) -> Result<InsertOutcome<Quiz>>;
    async fn find_by_id(&self, id: i64) -> Result<Option<Quiz>>;
    async fn find_by_content(&self, content_id: i64) -> Result<Option<Quiz>>;
    async fn list(&self) -> Result<Vec<Quiz>>;
    async fn update_title(&self, id: i64, title: &str) -> Result<Quiz>;
    async fn delete(&self, id: i64) -> Result<()>;

    async fn list_questions(&self, quiz_id: i64) -> Result<Vec<QuestionWithAnswers>>;
    /// Inserts questions with their answers in one transaction
    async fn add_questions(
        &self,
        quiz_id: i64,
        questions: &[QuestionInput],
    ) -> Result<Vec<QuestionWithAnswers>>;
    /// Applies question updates, creations and answer deletions in one transaction
    async fn apply_question_changes(
        &self,
        quiz_id: i64,
        changes: &[QuestionUpdateInput],
    ) -> Result<()>;
}

pub struct QuizRepositoryImpl {
    pool: MySqlPool,
}

impl QuizRepositoryImpl {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    async fn insert_question(
        tx: &mut Transaction<'static, MySql>,
        quiz_id: i64,
        question: &QuestionInput,
    ) -> Result<i64> {
        let result = sqlx::query(
            r#"
            INSERT INTO questions (quiz_id, question_text, type, created_at)
            VALUES (?, ?, ?, NOW())
            "#,
        )
        .bind(quiz_id)
        .bind(&question.question_text)
        .bind(question.question_type)
        .execute(&mut **tx)
        .await?;
        let question_id = result.last_insert_id() as i64;

        for answer in &question.answers {
            Self::insert_answer(tx, question_id, &answer.answer_text, answer.is_correct).await?;
        }

        Ok(question_id)
    }

    async fn insert_answer(
        tx: &mut Transaction<'static, MySql>,
        question_id: i64,
        answer_text: &str,
        is_correct: bool,
    ) -> Result<()> {
        sqlx::query(
            "INSERT INTO quiz_answers (question_id, answer_text, is_correct) VALUES (?, ?, ?)",
        )
        .bind(question_id)
        .bind(answer_text)
        .bind(is_correct)
        .execute(&mut **tx)
        .await?;
        Ok(())
    }
}

#[async_trait]
impl QuizRepository for QuizRepositoryImpl {
    async fn create(&self, input: &CreateQuizInput) -> Result<InsertOutcome<Quiz>> {
        let result = sqlx::query(
            r#"
            INSERT INTO quizzes (content_id, title, created_at, updated_at)
            VALUES (?, ?, NOW(), NOW())
            "#,
        )
        .bind(input.content_id)
        .bind(&input.title)
        .execute(&self.pool)
        .await;

        let id = match result {
            Ok(done) => done.last_insert_id() as i64,
            Err(e) if is_unique_violation(&e) => return Ok(InsertOutcome::AlreadyExists),
            Err(e) => return Err(e.into()),
        };

        let quiz = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Failed to create quiz")))?;
        Ok(InsertOutcome::Created(quiz))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Quiz>> {
        let quiz = sqlx::query_as::<_, Quiz>(
            "SELECT id, content_id, title, created_at, updated_at FROM quizzes WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(quiz)
    }

    async fn find_by_content(&self, content_id: i64) -> Result<Option<Quiz>> {
        let quiz = sqlx::query_as::<_, Quiz>(
            "SELECT id, content_id, title, created_at, updated_at FROM quizzes WHERE content_id = ?",
        )
        .bind(content_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(quiz)
    }

    async fn list(&self) -> Result<Vec<Quiz>> {
        let quizzes = sqlx::query_as::<_, Quiz>(
            "SELECT id, content_id, title, created_at, updated_at FROM quizzes ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(quizzes)
    }

    async fn update_title(&self, id: i64, title: &str) -> Result<Quiz> {
        if self.find_by_id(id).await?.is_none() {
            return Err(AppError::NotFound(format!("Quiz {} not found", id)));
        }

        sqlx::query("UPDATE quizzes SET title = ?, updated_at = NOW() WHERE id = ?")
            .bind(title)
            .bind(id)
            .execute(&self.pool)
            .await?;

        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Failed to update quiz")))
    }

    async fn delete(&self, id: i64) -> Result<()> {
        let result = sqlx::query("DELETE FROM quizzes WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Quiz {} not found", id)));
        }

        Ok(())
    }

    async fn list_questions(&self, quiz_id: i64) -> Result<Vec<QuestionWithAnswers>> {
        let questions = sqlx::query_as::<_, Question>(
            r#"
            SELECT id, quiz_id, question_text, type, created_at
            FROM questions
            WHERE quiz_id = ?
            ORDER BY id
            "#,
        )
        .bind(quiz_id)
        .fetch_all(&self.pool)
        .await?;

        let answers = sqlx::query_as::<_, QuizAnswer>(
            r#"
            SELECT a.id, a.question_id, a.answer_text, a.is_correct
            FROM quiz_answers a
            JOIN questions q ON q.id = a.question_id
            WHERE q.quiz_id = ?
            ORDER BY a.id
            "#,
        )
        .bind(quiz_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(questions
            .into_iter()
            .map(|question| {
                let answers = answers
                    .iter()
                    .filter(|a| a.question_id == question.id)
                    .cloned()
                    .collect();
                QuestionWithAnswers { question, answers }
            })
            .collect())
    }

    async fn add_questions(
        &self,
        quiz_id: i64,
        questions: &[QuestionInput],
    ) -> Result<Vec<QuestionWithAnswers>> {
        let mut tx = self.pool.begin().await?;
        let mut created_ids = Vec::with_capacity(questions.len());
        for question in questions {
            created_ids.push(Self::insert_question(&mut tx, quiz_id, question).await?);
        }
        tx.commit().await?;

        let all = self.list_questions(quiz_id).await?;
        Ok(all
            .into_iter()
            .filter(|q| created_ids.contains(&q.question.id))
            .collect())
    }

    async fn apply_question_changes(
        &self,
        quiz_id: i64,
        changes: &[QuestionUpdateInput],
    ) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        for change in changes {
            let question_id = match change.id {
                Some(question_id) => {
                    sqlx::query(
                        r#"
                        UPDATE questions
                        SET question_text = COALESCE(?, question_text), type = COALESCE(?, type)
                        WHERE id = ? AND quiz_id = ?
                        "#,
                    )
                    .bind(&change.question_text)
                    .bind(change.question_type)
                    .bind(question_id)
                    .bind(quiz_id)
                    .execute(&mut *tx)
                    .await?;
                    question_id
                }
                None => {
                    let (Some(question_text), Some(question_type)) =
                        (&change.question_text, change.question_type)
                    else {
                        return Err(AppError::BadRequest(
                            "New questions require question_text and type".to_string(),
                        ));
                    };
                    let result = sqlx::query(
                        r#"
                        INSERT INTO questions (quiz_id, question_text, type, created_at)
                        VALUES (?, ?, ?, NOW())
                        "#,
                    )
                    .bind(quiz_id)
                    .bind(question_text)
                    .bind(question_type)
                    .execute(&mut *tx)
                    .await?;
                    result.last_insert_id() as i64
                }
            };

            for answer_id in &change.deleted_answer_ids {
                sqlx::query("DELETE FROM quiz_answers WHERE id = ? AND question_id = ?")
                    .bind(answer_id)
                    .bind(question_id)
                    .execute(&mut *tx)
                    .await?;
            }

            for answer in &change.answers {
                match answer.id {
                    Some(answer_id) => {
                        sqlx::query(
                            r#"
                            UPDATE quiz_answers
                            SET answer_text = COALESCE(?, answer_text),
                                is_correct = COALESCE(?, is_correct)
                            WHERE id = ? AND question_id = ?
                            "#,
                        )
                        .bind(&answer.answer_text)
                        .bind(answer.is_correct)
                        .bind(answer_id)
                        .bind(question_id)
                        .execute(&mut *tx)
                        .await?;
                    }
                    None => {
                        let answer_text = answer.answer_text.as_deref().ok_or_else(|| {
                            AppError::BadRequest("New answers require answer_text".to_string())
                        })?;
                        Self::insert_answer(
                            &mut tx,
                            question_id,
                            answer_text,
                            answer.is_correct.unwrap_or(false),
                        )
                        .await?;
                    }
                }
            }
        }

        tx.commit().await?;
        Ok(())
    }
}
