//! Quiz and question authoring handlers

use crate::api::ApiResponse;
use crate::domain::{
    AddQuestionsInput, CreateQuizInput, QuestionWithAnswers, Quiz, QuizDetail, QuizWithQuestions,
    Role, UpdateQuestionsInput, UpdateQuizInput,
};
use crate::error::Result;
use crate::middleware::auth::AuthUser;
use crate::state::HasAssessment;
use axum::{
    extract::{Path, State},
    Json,
};

pub async fn create<S: HasAssessment>(
    State(state): State<S>,
    auth: AuthUser,
    Json(input): Json<CreateQuizInput>,
) -> Result<ApiResponse<Quiz>> {
    auth.require_role(&[Role::Admin])?;
    let quiz = state.quiz_service().create(input).await?;
    Ok(ApiResponse::created("Quiz created successfully!", quiz))
}

pub async fn list<S: HasAssessment>(
    State(state): State<S>,
) -> Result<ApiResponse<Vec<QuizWithQuestions>>> {
    let quizzes = state.quiz_service().list().await?;
    Ok(ApiResponse::ok("Quizzes retrieved successfully", quizzes))
}

pub async fn get<S: HasAssessment>(
    State(state): State<S>,
    Path(id): Path<i64>,
) -> Result<ApiResponse<QuizDetail>> {
    let quiz = state.quiz_service().get(id).await?;
    Ok(ApiResponse::ok("Quiz retrieved successfully", quiz))
}

pub async fn update<S: HasAssessment>(
    State(state): State<S>,
    auth: AuthUser,
    Path(id): Path<i64>,
    Json(input): Json<UpdateQuizInput>,
) -> Result<ApiResponse<Quiz>> {
    auth.require_role(&[Role::Admin])?;
    let quiz = state.quiz_service().update(id, input).await?;
    Ok(ApiResponse::ok("Quiz updated successfully", quiz))
}

pub async fn delete<S: HasAssessment>(
    State(state): State<S>,
    auth: AuthUser,
    Path(id): Path<i64>,
) -> Result<ApiResponse<()>> {
    auth.require_role(&[Role::Admin])?;
    state.quiz_service().delete(id).await?;
    Ok(ApiResponse::message("Quiz deleted successfully"))
}

pub async fn add_questions<S: HasAssessment>(
    State(state): State<S>,
    auth: AuthUser,
    Path(quiz_id): Path<i64>,
    Json(input): Json<AddQuestionsInput>,
) -> Result<ApiResponse<Vec<QuestionWithAnswers>>> {
    auth.require_role(&[Role::Admin])?;
    let questions = state.quiz_service().add_questions(quiz_id, input).await?;
    Ok(ApiResponse::created(
        "Question and answers added successfully",
        questions,
    ))
}

pub async fn update_questions<S: HasAssessment>(
    State(state): State<S>,
    auth: AuthUser,
    Path(quiz_id): Path<i64>,
    Json(input): Json<UpdateQuestionsInput>,
) -> Result<ApiResponse<Vec<QuestionWithAnswers>>> {
    auth.require_role(&[Role::Admin])?;
    let questions = state.quiz_service().update_questions(quiz_id, input).await?;
    Ok(ApiResponse::ok(
        "Question and answers updated successfully",
        questions,
    ))
}
