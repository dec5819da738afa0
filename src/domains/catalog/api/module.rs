//! Module API handlers

use crate::api::ApiResponse;
use crate::domain::{CourseModule, CreateModuleInput, ModuleWithContents, Role, UpdateModuleInput};
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
    Json(input): Json<CreateModuleInput>,
) -> Result<ApiResponse<CourseModule>> {
    auth.require_role(&[Role::Admin])?;
    let module = state.module_service().create(input).await?;
    Ok(ApiResponse::created("Module created successfully!", module))
}

pub async fn list<S: HasCatalog>(State(state): State<S>) -> Result<ApiResponse<Vec<CourseModule>>> {
    let modules = state.module_service().list().await?;
    Ok(ApiResponse::ok("Module fetched successfully!", modules))
}

pub async fn get<S: HasCatalog>(
    State(state): State<S>,
    Path(id): Path<i64>,
) -> Result<ApiResponse<ModuleWithContents>> {
    let module = state.module_service().get(id).await?;
    Ok(ApiResponse::ok("Module fetched successfully!", module))
}

/// Modules of a course, each with its contents
pub async fn list_by_course<S: HasCatalog>(
    State(state): State<S>,
    Path(course_id): Path<i64>,
) -> Result<ApiResponse<Vec<ModuleWithContents>>> {
    let modules = state.module_service().list_by_course(course_id).await?;
    Ok(ApiResponse::ok("Course Modules fetched successfully!", modules))
}

pub async fn update<S: HasCatalog>(
    State(state): State<S>,
    auth: AuthUser,
    Path(id): Path<i64>,
    Json(input): Json<UpdateModuleInput>,
) -> Result<ApiResponse<CourseModule>> {
    auth.require_role(&[Role::Admin])?;
    let module = state.module_service().update(id, input).await?;
    Ok(ApiResponse::ok("Module updated successfully!", module))
}

pub async fn delete<S: HasCatalog>(
    State(state): State<S>,
    auth: AuthUser,
    Path(id): Path<i64>,
) -> Result<ApiResponse<()>> {
    auth.require_role(&[Role::Admin])?;
    state.module_service().delete(id).await?;
    Ok(ApiResponse::message("Module deleted successfully!"))
}
