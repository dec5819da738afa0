//! Cart and wishlist handlers
//!
//! Both lists share one set of handlers; the route picks the list.

use crate::api::ApiResponse;
use crate::domain::{Course, SavedCourse, SavedCourseInput, SavedListKind};
use crate::error::Result;
use crate::middleware::auth::AuthUser;
use crate::state::HasCommerce;
use axum::{
    extract::{Path, State},
    Json,
};

async fn add<S: HasCommerce>(
    state: &S,
    kind: SavedListKind,
    auth: &AuthUser,
    input: SavedCourseInput,
) -> Result<ApiResponse<SavedCourse>> {
    let saved = state
        .saved_course_service()
        .add(kind, auth.user_id, input)
        .await?;
    Ok(ApiResponse::created(
        format!("Course added to {}", kind.label()),
        saved,
    ))
}

async fn list<S: HasCommerce>(
    state: &S,
    kind: SavedListKind,
    auth: &AuthUser,
) -> Result<ApiResponse<Vec<Course>>> {
    let courses = state
        .saved_course_service()
        .list(kind, auth.user_id)
        .await?;
    Ok(ApiResponse::ok(
        format!("{} courses fetched successfully", capitalize(kind.label())),
        courses,
    ))
}

async fn remove<S: HasCommerce>(
    state: &S,
    kind: SavedListKind,
    auth: &AuthUser,
    course_id: i64,
) -> Result<ApiResponse<()>> {
    state
        .saved_course_service()
        .remove(kind, auth.user_id, course_id)
        .await?;
    Ok(ApiResponse::message(format!(
        "Course removed from {}",
        kind.label()
    )))
}

fn capitalize(label: &str) -> String {
    let mut chars = label.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub async fn add_to_cart<S: HasCommerce>(
    State(state): State<S>,
    auth: AuthUser,
    Json(input): Json<SavedCourseInput>,
) -> Result<ApiResponse<SavedCourse>> {
    add(&state, SavedListKind::Cart, &auth, input).await
}

pub async fn list_cart<S: HasCommerce>(
    State(state): State<S>,
    auth: AuthUser,
) -> Result<ApiResponse<Vec<Course>>> {
    list(&state, SavedListKind::Cart, &auth).await
}

pub async fn remove_from_cart<S: HasCommerce>(
    State(state): State<S>,
    auth: AuthUser,
    Path(course_id): Path<i64>,
) -> Result<ApiResponse<()>> {
    remove(&state, SavedListKind::Cart, &auth, course_id).await
}

pub async fn add_to_wishlist<S: HasCommerce>(
    State(state): State<S>,
    auth: AuthUser,
    Json(input): Json<SavedCourseInput>,
) -> Result<ApiResponse<SavedCourse>> {
    add(&state, SavedListKind::Wishlist, &auth, input).await
}

pub async fn list_wishlist<S: HasCommerce>(
    State(state): State<S>,
    auth: AuthUser,
) -> Result<ApiResponse<Vec<Course>>> {
    list(&state, SavedListKind::Wishlist, &auth).await
}

pub async fn remove_from_wishlist<S: HasCommerce>(
    State(state): State<S>,
    auth: AuthUser,
    Path(course_id): Path<i64>,
) -> Result<ApiResponse<()>> {
    remove(&state, SavedListKind::Wishlist, &auth, course_id).await
}
