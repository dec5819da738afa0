//! Content API handlers

use crate::api::ApiResponse;
use crate::domain::{Content, ContentWithQuiz, CreateContentInput, Role, UpdateContentInput};
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
    Json(input): Json<CreateContentInput>,
) -> Result<ApiResponse<Content>> {
    auth.require_role(&[Role::Admin])?;
    let content = state.content_service().create(input).await?;
    Ok(ApiResponse::created("Content created successfully!", content))
}

pub async fn list<S: HasCatalog>(State(state): State<S>) -> Result<ApiResponse<Vec<Content>>> {
    let contents = state.content_service().list().await?;
    Ok(ApiResponse::ok("Content fetched successfully!", contents))
}

pub async fn get<S: HasCatalog>(
    State(state): State<S>,
    Path(id): Path<i64>,
) -> Result<ApiResponse<ContentWithQuiz>> {
    let content = state.content_service().get(id).await?;
    Ok(ApiResponse::ok("Content fetched successfully!", content))
}

pub async fn list_by_module<S: HasCatalog>(
    State(state): State<S>,
    Path(module_id): Path<i64>,
) -> Result<ApiResponse<Vec<ContentWithQuiz>>> {
    let contents = state.content_service().list_by_module(module_id).await?;
    Ok(ApiResponse::ok("Module's content fetched successfully!", contents))
}

pub async fn update<S: HasCatalog>(
    State(state): State<S>,
    auth: AuthUser,
    Path(id): Path<i64>,
    Json(input): Json<UpdateContentInput>,
) -> Result<ApiResponse<Content>> {
    auth.require_role(&[Role::Admin])?;
    let content = state.content_service().update(id, input).await?;
    Ok(ApiResponse::ok("Content updated successfully!", content))
}

pub async fn delete<S: HasCatalog>(
    State(state): State<S>,
    auth: AuthUser,
    Path(id): Path<i64>,
) -> Result<ApiResponse<()>> {
    auth.require_role(&[Role::Admin])?;
    state.content_service().delete(id).await?;
    Ok(ApiResponse::message("Content deleted successfully!"))
}
