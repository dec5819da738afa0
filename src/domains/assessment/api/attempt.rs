//! Quiz attempt handlers

use crate::api::ApiResponse;
use crate::domain::{AttemptResult, QuizAttempt, SubmitAttemptInput};
use crate::error::Result;
use crate::middleware::auth::AuthUser;
use crate::state::HasAssessment;
use axum::{
    extract::{Path, State},
    Json,
};

/// Score a submission for the caller
pub async fn submit<S: HasAssessment>(
    State(state): State<S>,
    auth: AuthUser,
    Json(input): Json<SubmitAttemptInput>,
) -> Result<ApiResponse<AttemptResult>> {
    let result = state.attempt_service().submit(auth.user_id, input).await?;
    Ok(ApiResponse::ok("Quiz submitted successfully", result))
}

pub async fn list<S: HasAssessment>(
    State(state): State<S>,
    auth: AuthUser,
    Path(quiz_id): Path<i64>,
) -> Result<ApiResponse<Vec<QuizAttempt>>> {
    let attempts = state.attempt_service().list(auth.user_id, quiz_id).await?;
    Ok(ApiResponse::ok("Quiz attempts retrieved successfully", attempts))
}
