//! Enrollment, progress and certificate domain models

use super::catalog::{Content, Course, CourseModule};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A user's registered access to a course
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Enrollment {
    pub id: i64,
    pub user_id: i64,
    pub course_id: i64,
    pub progress_percentage: i32,
    pub completed_at: Option<DateTime<Utc>>,
    pub access_expires_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateEnrollmentInput {
    #[validate(range(min = 1))]
    pub user_id: i64,
    #[validate(range(min = 1))]
    pub course_id: i64,
    #[serde(default)]
    #[validate(range(min = 0, max = 100))]
    pub progress_percentage: i32,
    pub completed_at: Option<DateTime<Utc>>,
    pub access_expires_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct UserModuleProgress {
    pub id: i64,
    pub user_id: i64,
    pub module_id: i64,
    pub is_completed: bool,
    pub progress_percentage: i32,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct UserContentProgress {
    pub id: i64,
    pub user_id: i64,
    pub content_id: i64,
    pub is_completed: bool,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Certificate {
    pub id: i64,
    pub user_id: i64,
    pub course_id: i64,
    pub certificate_url: String,
    pub issued_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CompleteContentInput {
    #[validate(range(min = 1, message = "content_id is required"))]
    pub content_id: i64,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CompleteModuleInput {
    #[validate(range(min = 1, message = "module_id is required"))]
    pub module_id: i64,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CompleteCourseInput {
    #[validate(range(min = 1, message = "course_id is required"))]
    pub course_id: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ModuleProgressQuery {
    pub module_id: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CourseProgressQuery {
    pub course_id: i64,
}

// ============================================================
// Progress views
// ============================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentProgressEntry {
    #[serde(flatten)]
    pub content: Content,
    pub progress: Option<UserContentProgress>,
}

impl ContentProgressEntry {
    pub fn is_completed(&self) -> bool {
        self.progress.as_ref().is_some_and(|p| p.is_completed)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModuleProgressEntry {
    #[serde(flatten)]
    pub module: CourseModule,
    pub progress: Option<UserModuleProgress>,
}

impl ModuleProgressEntry {
    pub fn is_completed(&self) -> bool {
        self.progress.as_ref().is_some_and(|p| p.is_completed)
    }
}

/// Content completion inside one module for one user
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleProgressSummary {
    pub total_contents: usize,
    pub completed_count: usize,
    pub progress_percentage: f64,
    pub module_contents: Vec<ContentProgressEntry>,
}

/// Module completion inside one course for one user
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseProgressSummary {
    pub total_modules: usize,
    pub completed_count: usize,
    pub progress_percentage: f64,
    pub course_modules: Vec<ModuleProgressEntry>,
}

/// Result of a successful course completion
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourseCompletion {
    pub enrollment: Enrollment,
    pub certificate: Certificate,
    pub completed: i64,
    pub total: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MyModule {
    #[serde(flatten)]
    pub module: CourseModule,
    pub progress: Option<UserModuleProgress>,
    pub contents: Vec<ContentProgressEntry>,
}

/// An enrolled course with this user's progress rows attached
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MyCourse {
    #[serde(flatten)]
    pub course: Course,
    pub enrollment: Enrollment,
    pub modules: Vec<MyModule>,
}
