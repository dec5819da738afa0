//! Enrollment and enrolled-course API handlers

use crate::api::ApiResponse;
use crate::domain::{Certificate, CourseOutline, CreateEnrollmentInput, Enrollment, MyCourse, Role};
use crate::error::Result;
use crate::middleware::auth::AuthUser;
use crate::state::HasLearning;
use axum::{
    extract::{Path, State},
    Json,
};

/// Admin-only: enroll any user in any course
pub async fn create<S: HasLearning>(
    State(state): State<S>,
    auth: AuthUser,
    Json(input): Json<CreateEnrollmentInput>,
) -> Result<ApiResponse<Enrollment>> {
    auth.require_role(&[Role::Admin])?;
    let enrollment = state.enrollment_service().create(input).await?;
    Ok(ApiResponse::created("Enrollment created successfully!", enrollment))
}

pub async fn list<S: HasLearning>(
    State(state): State<S>,
    auth: AuthUser,
) -> Result<ApiResponse<Vec<Enrollment>>> {
    auth.require_role(&[Role::Admin])?;
    let enrollments = state.enrollment_service().list().await?;
    Ok(ApiResponse::ok("Enrollment fetch successfully!", enrollments))
}

pub async fn list_user_courses<S: HasLearning>(
    State(state): State<S>,
    Path(user_id): Path<i64>,
) -> Result<ApiResponse<Vec<CourseOutline>>> {
    let courses = state.enrollment_service().list_user_courses(user_id).await?;
    Ok(ApiResponse::ok("Enrolled courses fetched successfully", courses))
}

/// The caller's enrolled courses with their progress rows
pub async fn my_courses<S: HasLearning>(
    State(state): State<S>,
    auth: AuthUser,
) -> Result<ApiResponse<Vec<MyCourse>>> {
    let courses = state.enrollment_service().my_courses(auth.user_id).await?;
    Ok(ApiResponse::ok("Course fetched successfully!", courses))
}

pub async fn certificates<S: HasLearning>(
    State(state): State<S>,
    auth: AuthUser,
) -> Result<ApiResponse<Vec<Certificate>>> {
    let certificates = state.enrollment_service().certificates(auth.user_id).await?;
    Ok(ApiResponse::ok("Certificates fetched successfully", certificates))
}
