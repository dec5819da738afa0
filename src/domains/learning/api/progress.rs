//! Progress tracking and course completion handlers

use crate::api::ApiResponse;
use crate::domain::{
    CompleteContentInput, CompleteCourseInput, CompleteModuleInput, CourseCompletion,
    CourseProgressQuery, CourseProgressSummary, ModuleProgressQuery, ModuleProgressSummary, Role,
    UserContentProgress, UserModuleProgress,
};
use crate::error::Result;
use crate::middleware::auth::AuthUser;
use crate::state::HasLearning;
use axum::{
    extract::{Query, State},
    Json,
};

pub async fn complete_content<S: HasLearning>(
    State(state): State<S>,
    auth: AuthUser,
    Json(input): Json<CompleteContentInput>,
) -> Result<ApiResponse<UserContentProgress>> {
    let progress = state
        .progress_service()
        .complete_content(auth.user_id, input)
        .await?;
    Ok(ApiResponse::created("Content marked as completed", progress))
}

pub async fn complete_module<S: HasLearning>(
    State(state): State<S>,
    auth: AuthUser,
    Json(input): Json<CompleteModuleInput>,
) -> Result<ApiResponse<UserModuleProgress>> {
    let progress = state
        .progress_service()
        .complete_module(auth.user_id, input)
        .await?;
    Ok(ApiResponse::created("Module marked as completed", progress))
}

pub async fn module_progress<S: HasLearning>(
    State(state): State<S>,
    auth: AuthUser,
    Query(query): Query<ModuleProgressQuery>,
) -> Result<ApiResponse<ModuleProgressSummary>> {
    let summary = state
        .progress_service()
        .module_progress(auth.user_id, query.module_id)
        .await?;
    Ok(ApiResponse::ok(
        "Module content progress fetched successfully",
        summary,
    ))
}

pub async fn course_progress<S: HasLearning>(
    State(state): State<S>,
    auth: AuthUser,
    Query(query): Query<CourseProgressQuery>,
) -> Result<ApiResponse<CourseProgressSummary>> {
    let summary = state
        .progress_service()
        .course_progress(auth.user_id, query.course_id)
        .await?;
    Ok(ApiResponse::ok("Course progress fetched successfully", summary))
}

/// Students only; issues the certificate
pub async fn complete_course<S: HasLearning>(
    State(state): State<S>,
    auth: AuthUser,
    Json(input): Json<CompleteCourseInput>,
) -> Result<ApiResponse<CourseCompletion>> {
    auth.require_role(&[Role::Student])?;
    let completion = state
        .progress_service()
        .complete_course(auth.user_id, input)
        .await?;
    Ok(ApiResponse::ok("Course completed successfully", completion))
}
