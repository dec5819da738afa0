//! Course business logic

use crate::domain::{Course, CourseDetail, CourseOverview, CreateCourseInput, UpdateCourseInput};
use crate::error::{AppError, Result};
use crate::repository::{CategoryRepository, CourseRepository, ModuleRepository, UserRepository};
use std::sync::Arc;
use validator::Validate;

pub struct CourseService<C, K, U, M>
where
    C: CourseRepository,
    K: CategoryRepository,
    U: UserRepository,
    M: ModuleRepository,
{
    repo: Arc<C>,
    category_repo: Arc<K>,
    user_repo: Arc<U>,
    module_repo: Arc<M>,
}

impl<C, K, U, M> CourseService<C, K, U, M>
where
    C: CourseRepository,
    K: CategoryRepository,
    U: UserRepository,
    M: ModuleRepository,
{
    pub fn new(repo: Arc<C>, category_repo: Arc<K>, user_repo: Arc<U>, module_repo: Arc<M>) -> Self {
        Self {
            repo,
            category_repo,
            user_repo,
            module_repo,
        }
    }

    pub async fn create(&self, input: CreateCourseInput) -> Result<Course> {
        input.validate()?;
        self.ensure_references(Some(input.category_id), Some(input.instructor_id))
            .await?;

        let course = self.repo.create(&input).await?;
        tracing::info!(course_id = course.id, "Course created");
        Ok(course)
    }

    pub async fn list(&self) -> Result<Vec<CourseOverview>> {
        self.repo.list_overviews().await
    }

    /// Course overview plus its modules ordered by position
    pub async fn get(&self, id: i64) -> Result<CourseDetail> {
        let overview = self
            .repo
            .find_overview(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Course not found!".to_string()))?;
        let modules = self.module_repo.list_by_course(id).await?;

        Ok(CourseDetail { overview, modules })
    }

    pub async fn update(&self, id: i64, input: UpdateCourseInput) -> Result<Course> {
        if input.is_empty() {
            return Err(AppError::BadRequest(
                "No fields provided for update".to_string(),
            ));
        }
        input.validate()?;
        self.ensure_references(input.category_id, input.instructor_id)
            .await?;

        self.repo.update(id, &input).await
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        self.repo.delete(id).await?;
        tracing::info!(course_id = id, "Course deleted");
        Ok(())
    }

    async fn ensure_references(
        &self,
        category_id: Option<i64>,
        instructor_id: Option<i64>,
    ) -> Result<()> {
        if let Some(category_id) = category_id {
            if self.category_repo.find_by_id(category_id).await?.is_none() {
                return Err(AppError::NotFound("Category not found".to_string()));
            }
        }
        if let Some(instructor_id) = instructor_id {
            if self.user_repo.find_by_id(instructor_id).await?.is_none() {
                return Err(AppError::NotFound("Instructor not found".to_string()));
            }
        }
        Ok(())
    }
}
