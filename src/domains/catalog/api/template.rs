//! Certificate template API handlers

use crate::api::ApiResponse;
use crate::domain::{Role, Template, TemplateInput};
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
    Json(input): Json<TemplateInput>,
) -> Result<ApiResponse<Template>> {
    auth.require_role(&[Role::Admin])?;
    let template = state.template_service().create(input).await?;
    Ok(ApiResponse::created("Template created successfully!", template))
}

pub async fn list<S: HasCatalog>(State(state): State<S>) -> Result<ApiResponse<Vec<Template>>> {
    let templates = state.template_service().list().await?;
    Ok(ApiResponse::ok("Templates fetched successfully!", templates))
}

pub async fn get<S: HasCatalog>(
    State(state): State<S>,
    Path(id): Path<i64>,
) -> Result<ApiResponse<Template>> {
    let template = state.template_service().get(id).await?;
    Ok(ApiResponse::ok("Template fetched successfully!", template))
}

pub async fn update<S: HasCatalog>(
    State(state): State<S>,
    auth: AuthUser,
    Path(id): Path<i64>,
    Json(input): Json<TemplateInput>,
) -> Result<ApiResponse<Template>> {
    auth.require_role(&[Role::Admin])?;
    let template = state.template_service().update(id, input).await?;
    Ok(ApiResponse::ok("Template updated successfully!", template))
}

pub async fn delete<S: HasCatalog>(
    State(state): State<S>,
    auth: AuthUser,
    Path(id): Path<i64>,
) -> Result<ApiResponse<()>> {
    auth.require_role(&[Role::Admin])?;
    state.template_service().delete(id).await?;
    Ok(ApiResponse::message("Template deleted successfully!"))
}
