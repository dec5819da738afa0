//! Quiz attempt submission

use super::scoring;
use crate::domain::{AttemptResult, QuestionWithAnswers, QuizAttempt, SubmitAttemptInput};
use crate::error::{AppError, Result};
use crate::repository::{AttemptRepository, QuizRepository};
use chrono::Utc;
use metrics::counter;
use std::collections::HashMap;
use std::sync::Arc;
use validator::Validate;

pub struct AttemptService<A: AttemptRepository, Q: QuizRepository> {
    repo: Arc<A>,
    quiz_repo: Arc<Q>,
}

impl<A: AttemptRepository, Q: QuizRepository> AttemptService<A, Q> {
    pub fn new(repo: Arc<A>, quiz_repo: Arc<Q>) -> Self {
        Self { repo, quiz_repo }
    }

    /// Score and record a submission.
    ///
    /// The quiz, each referenced question and its selected answers are
    /// checked before the attempt row is opened. Duplicate question ids are
    /// scored once per entry.
    pub async fn submit(&self, user_id: i64, input: SubmitAttemptInput) -> Result<AttemptResult> {
        input.validate()?;

        let quiz_id = input.quiz_id;
        if self.quiz_repo.find_by_id(quiz_id).await?.is_none() {
            return Err(AppError::NotFound("Quiz not found".to_string()));
        }

        let questions: HashMap<i64, QuestionWithAnswers> = self
            .quiz_repo
            .list_questions(quiz_id)
            .await?
            .into_iter()
            .map(|q| (q.question.id, q))
            .collect();
        for entry in &input.answers {
            let question = questions.get(&entry.question_id).ok_or_else(|| {
                AppError::BadRequest(format!(
                    "Question {} does not belong to this quiz",
                    entry.question_id
                ))
            })?;
            if let Some(answer_id) = entry
                .selected_answer_ids
                .iter()
                .find(|id| !question.answers.iter().any(|a| a.id == **id))
            {
                return Err(AppError::BadRequest(format!(
                    "Answer {} does not belong to question {}",
                    answer_id, entry.question_id
                )));
            }
        }

        let attempt = self.repo.create(user_id, quiz_id).await?;

        let now = Utc::now();
        let mut rows = Vec::new();
        let mut total_correct = 0i64;
        for entry in &input.answers {
            let answer_key: Vec<i64> = questions
                .get(&entry.question_id)
                .map(|q| {
                    q.answers
                        .iter()
                        .filter(|a| a.is_correct)
                        .map(|a| a.id)
                        .collect()
                })
                .unwrap_or_default();
            // A skipped entry never scores, even against an empty answer key
            let is_correct = !entry.selected_answer_ids.is_empty()
                && scoring::is_exact_match(&answer_key, &entry.selected_answer_ids);
            if is_correct {
                total_correct += 1;
            }
            rows.extend(scoring::answer_rows(entry, is_correct, now));
        }
        self.repo.record_answers(attempt.id, &rows).await?;

        let total_questions = input.answers.len() as i64;
        let score = scoring::score(total_correct, total_questions);
        let attempt = self.repo.complete(attempt.id, score).await?;

        counter!(
            "lms_quiz_attempts_total",
            "outcome" => scoring::outcome(total_correct, total_questions)
        )
        .increment(1);
        tracing::info!(attempt_id = attempt.id, user_id, quiz_id, score, "Quiz attempt scored");

        Ok(AttemptResult {
            attempt,
            total_questions,
            total_correct,
        })
    }

    /// The user's attempts at a quiz
    pub async fn list(&self, user_id: i64, quiz_id: i64) -> Result<Vec<QuizAttempt>> {
        if self.quiz_repo.find_by_id(quiz_id).await?.is_none() {
            return Err(AppError::NotFound("Quiz not found".to_string()));
        }
        self.repo.list_by_user_and_quiz(user_id, quiz_id).await
    }
}
