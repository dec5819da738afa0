//! Cart and wishlist membership

use crate::domain::{Course, SavedCourse, SavedCourseInput, SavedListKind};
use crate::error::{AppError, Result};
use crate::repository::{CourseRepository, SavedCourseRepository};
use std::sync::Arc;
use validator::Validate;

pub struct SavedCourseService<S: SavedCourseRepository, C: CourseRepository> {
    repo: Arc<S>,
    course_repo: Arc<C>,
}

impl<S: SavedCourseRepository, C: CourseRepository> SavedCourseService<S, C> {
    pub fn new(repo: Arc<S>, course_repo: Arc<C>) -> Self {
        Self { repo, course_repo }
    }

    pub async fn add(
        &self,
        kind: SavedListKind,
        user_id: i64,
        input: SavedCourseInput,
    ) -> Result<SavedCourse> {
        input.validate()?;

        if self.course_repo.find_by_id(input.course_id).await?.is_none() {
            return Err(AppError::NotFound("Course not found".to_string()));
        }

        self.repo
            .add(kind, user_id, input.course_id)
            .await?
            .or_conflict(format!("This course is already in your {}!", kind.label()))
    }

    pub async fn list(&self, kind: SavedListKind, user_id: i64) -> Result<Vec<Course>> {
        self.repo.list_courses(kind, user_id).await
    }

    pub async fn remove(&self, kind: SavedListKind, user_id: i64, course_id: i64) -> Result<()> {
        self.repo.remove(kind, user_id, course_id).await
    }
}
