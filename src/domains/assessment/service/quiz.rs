//! Quiz and question authoring

use crate::domain::{
    AddQuestionsInput, CreateQuizInput, QuestionWithAnswers, Quiz, QuizDetail, QuizWithQuestions,
    UpdateQuestionsInput, UpdateQuizInput,
};
use crate::error::{AppError, Result};
use crate::repository::{ContentRepository, QuizRepository};
use std::collections::HashMap;
use std::sync::Arc;
use validator::Validate;

pub struct QuizService<Q: QuizRepository, T: ContentRepository> {
    repo: Arc<Q>,
    content_repo: Arc<T>,
}

impl<Q: QuizRepository, T: ContentRepository> QuizService<Q, T> {
    pub fn new(repo: Arc<Q>, content_repo: Arc<T>) -> Self {
        Self { repo, content_repo }
    }

    /// Create a quiz; a content holds at most one
    pub async fn create(&self, input: CreateQuizInput) -> Result<Quiz> {
        input.validate()?;
        if self.content_repo.find_by_id(input.content_id).await?.is_none() {
            return Err(AppError::NotFound("Content not found".to_string()));
        }

        self.repo
            .create(&input)
            .await?
            .or_conflict("Content already has a quiz")
    }

    pub async fn list(&self) -> Result<Vec<QuizWithQuestions>> {
        let quizzes = self.repo.list().await?;
        let mut result = Vec::with_capacity(quizzes.len());
        for quiz in quizzes {
            let questions = self.repo.list_questions(quiz.id).await?;
            result.push(QuizWithQuestions { quiz, questions });
        }
        Ok(result)
    }

    pub async fn get(&self, id: i64) -> Result<QuizDetail> {
        let quiz = self.find(id).await?;
        let content = self.content_repo.find_by_id(quiz.content_id).await?;
        let questions = self.repo.list_questions(id).await?;

        Ok(QuizDetail {
            quiz,
            content,
            questions,
        })
    }

    pub async fn update(&self, id: i64, input: UpdateQuizInput) -> Result<Quiz> {
        input.validate()?;
        self.repo.update_title(id, input.title.trim()).await
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        self.repo.delete(id).await
    }

    pub async fn add_questions(
        &self,
        quiz_id: i64,
        input: AddQuestionsInput,
    ) -> Result<Vec<QuestionWithAnswers>> {
        input.validate()?;
        self.find(quiz_id).await?;

        self.repo.add_questions(quiz_id, &input.questions).await
    }

    /// Apply question edits; every referenced question and answer must
    /// belong to this quiz
    pub async fn update_questions(
        &self,
        quiz_id: i64,
        input: UpdateQuestionsInput,
    ) -> Result<Vec<QuestionWithAnswers>> {
        input.validate()?;
        self.find(quiz_id).await?;

        let existing: HashMap<i64, Vec<i64>> = self
            .repo
            .list_questions(quiz_id)
            .await?
            .into_iter()
            .map(|q| (q.question.id, q.answers.iter().map(|a| a.id).collect()))
            .collect();

        for change in &input.questions {
            let answer_ids: &[i64] = match change.id {
                Some(question_id) => existing
                    .get(&question_id)
                    .map(Vec::as_slice)
                    .ok_or_else(|| {
                        AppError::BadRequest(format!(
                            "Question {} does not belong to this quiz",
                            question_id
                        ))
                    })?,
                None => &[],
            };

            let referenced = change
                .answers
                .iter()
                .filter_map(|a| a.id)
                .chain(change.deleted_answer_ids.iter().copied());
            for answer_id in referenced {
                if !answer_ids.contains(&answer_id) {
                    return Err(AppError::BadRequest(format!(
                        "Answer {} does not belong to this question",
                        answer_id
                    )));
                }
            }
        }

        self.repo
            .apply_question_changes(quiz_id, &input.questions)
            .await?;
        self.repo.list_questions(quiz_id).await
    }

    async fn find(&self, id: i64) -> Result<Quiz> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Quiz not found".to_string()))
    }
}
