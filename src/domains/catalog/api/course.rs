//! Course API handlers
//!
//! Reads are open to any authenticated user; writes require an admin.

use crate::api::ApiResponse;
use crate::domain::{
    Course, CourseDetail, CourseOverview, CreateCourseInput, Role, UpdateCourseInput,
};
use crate::error::Result;
use crate::middleware::auth::AuthUser;
use crate::state::HasCatalog;
use axum::{
    extract::{Path, State},
    Json,
};

pub async fn create<S: HasCatalog>(
    State(state): State<S>,
    auth: AuthUser,
    Json(input): Json<CreateCourseInput>,
) -> Result<ApiResponse<Course>> {
    auth.require_role(&[Role::Admin])?;
    let course = state.course_service().create(input).await?;
    Ok(ApiResponse::created("Course created successfully!", course))
}

pub async fn list<S: HasCatalog>(State(state): State<S>) -> Result<ApiResponse<Vec<CourseOverview>>> {
    let courses = state.course_service().list().await?;
    Ok(ApiResponse::ok("Courses fetched successfully!", courses))
}

pub async fn get<S: HasCatalog>(
    State(state): State<S>,
    Path(id): Path<i64>,
) -> Result<ApiResponse<CourseDetail>> {
    let course = state.course_service().get(id).await?;
    Ok(ApiResponse::ok("Course fetched successfully!", course))
}

pub async fn update<S: HasCatalog>(
    State(state): State<S>,
    auth: AuthUser,
    Path(id): Path<i64>,
    Json(input): Json<UpdateCourseInput>,
) -> Result<ApiResponse<Course>> {
    auth.require_role(&[Role::Admin])?;
    let course = state.course_service().update(id, input).await?;
    Ok(ApiResponse::ok("Course updated successfully!", course))
}

pub async fn delete<S: HasCatalog>(
    State(state): State<S>,
    auth: AuthUser,
    Path(id): Path<i64>,
) -> Result<ApiResponse<()>> {
    auth.require_role(&[Role::Admin])?;
    state.course_service().delete(id).await?;
    Ok(ApiResponse::message("Course deleted successfully!"))
}
