//! Course module business logic

use super::content::with_quizzes;
use crate::domain::{CourseModule, CreateModuleInput, ModuleWithContents, UpdateModuleInput};
use crate::error::{AppError, Result};
use crate::repository::{ContentRepository, CourseRepository, ModuleRepository, QuizRepository};
use std::sync::Arc;
use validator::Validate;

/// Modules of a course, each with its contents and their quizzes
pub(crate) async fn course_outline<M, T, Q>(
    module_repo: &M,
    content_repo: &T,
    quiz_repo: &Q,
    course_id: i64,
) -> Result<Vec<ModuleWithContents>>
where
    M: ModuleRepository,
    T: ContentRepository,
    Q: QuizRepository,
{
    let modules = module_repo.list_by_course(course_id).await?;
    let mut outline = Vec::with_capacity(modules.len());
    for module in modules {
        let contents = content_repo.list_by_module(module.id).await?;
        let contents = with_quizzes(quiz_repo, contents).await?;
        outline.push(ModuleWithContents { module, contents });
    }
    Ok(outline)
}

pub struct ModuleService<M, C, T, Q>
where
    M: ModuleRepository,
    C: CourseRepository,
    T: ContentRepository,
    Q: QuizRepository,
{
    repo: Arc<M>,
    course_repo: Arc<C>,
    content_repo: Arc<T>,
    quiz_repo: Arc<Q>,
}

impl<M, C, T, Q> ModuleService<M, C, T, Q>
where
    M: ModuleRepository,
    C: CourseRepository,
    T: ContentRepository,
    Q: QuizRepository,
{
    pub fn new(repo: Arc<M>, course_repo: Arc<C>, content_repo: Arc<T>, quiz_repo: Arc<Q>) -> Self {
        Self {
            repo,
            course_repo,
            content_repo,
            quiz_repo,
        }
    }

    pub async fn create(&self, input: CreateModuleInput) -> Result<CourseModule> {
        input.validate()?;
        self.ensure_course(input.course_id).await?;

        self.repo.create(&input).await
    }

    pub async fn list(&self) -> Result<Vec<CourseModule>> {
        self.repo.list().await
    }

    pub async fn get(&self, id: i64) -> Result<ModuleWithContents> {
        let module = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Module not found".to_string()))?;
        let contents = self.content_repo.list_by_module(id).await?;
        let contents = with_quizzes(self.quiz_repo.as_ref(), contents).await?;

        Ok(ModuleWithContents { module, contents })
    }

    pub async fn list_by_course(&self, course_id: i64) -> Result<Vec<ModuleWithContents>> {
        self.ensure_course(course_id).await?;
        course_outline(
            self.repo.as_ref(),
            self.content_repo.as_ref(),
            self.quiz_repo.as_ref(),
            course_id,
        )
        .await
    }

    pub async fn update(&self, id: i64, input: UpdateModuleInput) -> Result<CourseModule> {
        if input.is_empty() {
            return Err(AppError::BadRequest(
                "No fields provided for update".to_string(),
            ));
        }
        input.validate()?;
        if let Some(course_id) = input.course_id {
            self.ensure_course(course_id).await?;
        }

        self.repo.update(id, &input).await
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        self.repo.delete(id).await
    }

    async fn ensure_course(&self, course_id: i64) -> Result<()> {
        match self.course_repo.find_by_id(course_id).await? {
            Some(_) => Ok(()),
            None => Err(AppError::NotFound("Course not found".to_string())),
        }
    }
}
