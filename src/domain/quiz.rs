//! Quiz authoring and attempt domain models

use super::catalog::Content;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Quiz attached to exactly one content item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Quiz {
    pub id: i64,
    pub content_id: i64,
    pub title: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QuestionType {
    Text,
    MultipleChoice,
    TrueFalse,
}

impl std::str::FromStr for QuestionType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "TEXT" => Ok(QuestionType::Text),
            "MULTIPLE_CHOICE" => Ok(QuestionType::MultipleChoice),
            "TRUE_FALSE" => Ok(QuestionType::TrueFalse),
            _ => Err(format!("Unknown question type: {}", s)),
        }
    }
}

impl std::fmt::Display for QuestionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QuestionType::Text => write!(f, "TEXT"),
            QuestionType::MultipleChoice => write!(f, "MULTIPLE_CHOICE"),
            QuestionType::TrueFalse => write!(f, "TRUE_FALSE"),
        }
    }
}

crate::impl_mysql_string_enum!(QuestionType);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Question {
    pub id: i64,
    pub quiz_id: i64,
    pub question_text: String,
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub question_type: QuestionType,
    pub created_at: DateTime<Utc>,
}

/// One selectable answer; the correct ones form the question's answer key
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct QuizAnswer {
    pub id: i64,
    pub question_id: i64,
    pub answer_text: String,
    pub is_correct: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionWithAnswers {
    #[serde(flatten)]
    pub question: Question,
    pub answers: Vec<QuizAnswer>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizWithQuestions {
    #[serde(flatten)]
    pub quiz: Quiz,
    pub questions: Vec<QuestionWithAnswers>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizDetail {
    #[serde(flatten)]
    pub quiz: Quiz,
    pub content: Option<Content>,
    pub questions: Vec<QuestionWithAnswers>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateQuizInput {
    #[validate(range(min = 1, message = "content_id is required"))]
    pub content_id: i64,
    #[validate(length(min = 1, max = 255, message = "title is required"))]
    pub title: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateQuizInput {
    #[validate(length(min = 1, max = 255, message = "title is required"))]
    pub title: String,
}

// ============================================================
// Question authoring
// ============================================================

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AnswerInput {
    #[validate(length(min = 1, message = "Answer text cannot be empty"))]
    pub answer_text: String,
    #[serde(default)]
    pub is_correct: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct QuestionInput {
    #[validate(length(min = 1, message = "Question text cannot be empty"))]
    pub question_text: String,
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    #[validate(length(min = 1, message = "At least one answer is required"), nested)]
    pub answers: Vec<AnswerInput>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AddQuestionsInput {
    #[validate(length(min = 1, message = "At least one question is required"), nested)]
    pub questions: Vec<QuestionInput>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AnswerUpdateInput {
    /// Existing answer to update; absent means create
    pub id: Option<i64>,
    #[validate(length(min = 1, message = "Answer text cannot be empty"))]
    pub answer_text: Option<String>,
    pub is_correct: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct QuestionUpdateInput {
    /// Existing question to update; absent means create
    pub id: Option<i64>,
    #[validate(length(min = 1, message = "Question text cannot be empty"))]
    pub question_text: Option<String>,
    #[serde(rename = "type")]
    pub question_type: Option<QuestionType>,
    #[serde(default)]
    #[validate(nested)]
    pub answers: Vec<AnswerUpdateInput>,
    #[serde(default)]
    pub deleted_answer_ids: Vec<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateQuestionsInput {
    #[validate(length(min = 1, message = "At least one question is required"), nested)]
    pub questions: Vec<QuestionUpdateInput>,
}

// ============================================================
// Attempts
// ============================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AttemptStatus {
    #[default]
    InProgress,
    Completed,
}

impl std::str::FromStr for AttemptStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "IN_PROGRESS" => Ok(AttemptStatus::InProgress),
            "COMPLETED" => Ok(AttemptStatus::Completed),
            _ => Err(format!("Unknown attempt status: {}", s)),
        }
    }
}

impl std::fmt::Display for AttemptStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AttemptStatus::InProgress => write!(f, "IN_PROGRESS"),
            AttemptStatus::Completed => write!(f, "COMPLETED"),
        }
    }
}

crate::impl_mysql_string_enum!(AttemptStatus);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct QuizAttempt {
    pub id: i64,
    pub user_id: i64,
    pub quiz_id: i64,
    pub status: AttemptStatus,
    /// Percentage rounded to two decimals, set on completion
    pub score: Option<f64>,
    pub started_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

/// Recorded selection; `answer_id = None` marks a skipped question
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct UserQuizAnswer {
    pub id: i64,
    pub attempt_id: i64,
    pub question_id: i64,
    pub answer_id: Option<i64>,
    pub is_correct: bool,
    pub answered_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitAnswerInput {
    pub question_id: i64,
    #[serde(default)]
    pub selected_answer_ids: Vec<i64>,
    pub answered_at: Option<DateTime<Utc>>,
}

/// Attempt submission; the submitter comes from the access token
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SubmitAttemptInput {
    #[validate(range(min = 1, message = "quiz_id is required"))]
    pub quiz_id: i64,
    #[validate(length(min = 1, message = "At least one answer is required"))]
    pub answers: Vec<SubmitAnswerInput>,
}

/// Row to insert into `user_quiz_answers`
#[derive(Debug, Clone, PartialEq)]
pub struct NewUserQuizAnswer {
    pub question_id: i64,
    pub answer_id: Option<i64>,
    pub is_correct: bool,
    pub answered_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttemptResult {
    #[serde(flatten)]
    pub attempt: QuizAttempt,
    pub total_questions: i64,
    pub total_correct: i64,
}
