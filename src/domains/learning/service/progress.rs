//! Enrollment-gated progress rules and course completion
//!
//! Progress rows are unique per (user, module) and (user, content) at the
//! storage layer; a duplicate insert surfaces as `InsertOutcome::AlreadyExists`
//! and is reported as a conflict.

use crate::config::CertificateConfig;
use crate::domain::{
    completion_percentage, CompleteContentInput, CompleteCourseInput, CompleteModuleInput,
    ContentProgressEntry, CourseCompletion, CourseModule, CourseProgressSummary, Enrollment,
    ModuleProgressEntry, ModuleProgressSummary, UserContentProgress, UserModuleProgress,
};
use crate::error::{AppError, Result};
use crate::repository::{
    ContentRepository, EnrollmentRepository, ModuleRepository, ProgressRepository,
};
use metrics::counter;
use std::collections::HashMap;
use std::sync::Arc;
use validator::Validate;

const NO_ENROLLMENT: &str = "Not enrollment found!";

pub struct ProgressService<P, E, M, T>
where
    P: ProgressRepository,
    E: EnrollmentRepository,
    M: ModuleRepository,
    T: ContentRepository,
{
    repo: Arc<P>,
    enrollment_repo: Arc<E>,
    module_repo: Arc<M>,
    content_repo: Arc<T>,
    certificate: CertificateConfig,
}

impl<P, E, M, T> ProgressService<P, E, M, T>
where
    P: ProgressRepository,
    E: EnrollmentRepository,
    M: ModuleRepository,
    T: ContentRepository,
{
    pub fn new(
        repo: Arc<P>,
        enrollment_repo: Arc<E>,
        module_repo: Arc<M>,
        content_repo: Arc<T>,
        certificate: CertificateConfig,
    ) -> Self {
        Self {
            repo,
            enrollment_repo,
            module_repo,
            content_repo,
            certificate,
        }
    }

    /// Mark a content complete for an enrolled user
    pub async fn complete_content(
        &self,
        user_id: i64,
        input: CompleteContentInput,
    ) -> Result<UserContentProgress> {
        input.validate()?;

        let content = self
            .content_repo
            .find_by_id(input.content_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Content not found".to_string()))?;
        let module = self.find_module(content.module_id).await?;
        self.require_enrollment(user_id, module.course_id).await?;

        self.repo
            .create_content_progress(user_id, content.id)
            .await?
            .or_conflict("Content already completed")
    }

    /// Mark a module complete for an enrolled user
    pub async fn complete_module(
        &self,
        user_id: i64,
        input: CompleteModuleInput,
    ) -> Result<UserModuleProgress> {
        input.validate()?;

        let module = self.find_module(input.module_id).await?;
        self.require_enrollment(user_id, module.course_id).await?;

        self.repo
            .create_module_progress(user_id, module.id)
            .await?
            .or_conflict("Module already completed")
    }

    /// Content completion inside a module
    pub async fn module_progress(
        &self,
        user_id: i64,
        module_id: i64,
    ) -> Result<ModuleProgressSummary> {
        self.find_module(module_id).await?;

        let contents = self.content_repo.list_by_module(module_id).await?;
        let mut rows: HashMap<i64, UserContentProgress> = self
            .repo
            .list_content_progress_in_module(user_id, module_id)
            .await?
            .into_iter()
            .map(|p| (p.content_id, p))
            .collect();

        let module_contents: Vec<ContentProgressEntry> = contents
            .into_iter()
            .map(|content| {
                let progress = rows.remove(&content.id);
                ContentProgressEntry { content, progress }
            })
            .collect();

        let total_contents = module_contents.len();
        let completed_count = module_contents.iter().filter(|c| c.is_completed()).count();

        Ok(ModuleProgressSummary {
            total_contents,
            completed_count,
            progress_percentage: completion_percentage(completed_count, total_contents),
            module_contents,
        })
    }

    /// Module completion inside a course; requires an enrollment
    pub async fn course_progress(
        &self,
        user_id: i64,
        course_id: i64,
    ) -> Result<CourseProgressSummary> {
        self.enrollment_or_bad_request(user_id, course_id).await?;

        let course_modules = self.module_entries(user_id, course_id).await?;
        let total_modules = course_modules.len();
        let completed_count = course_modules.iter().filter(|m| m.is_completed()).count();

        Ok(CourseProgressSummary {
            total_modules,
            completed_count,
            progress_percentage: completion_percentage(completed_count, total_modules),
            course_modules,
        })
    }

    /// Complete a course and issue its certificate.
    ///
    /// Every module of the course must be completed; a course without
    /// modules cannot be completed.
    pub async fn complete_course(
        &self,
        user_id: i64,
        input: CompleteCourseInput,
    ) -> Result<CourseCompletion> {
        input.validate()?;
        let course_id = input.course_id;

        self.enrollment_or_bad_request(user_id, course_id).await?;

        let modules = self.module_entries(user_id, course_id).await?;
        if modules.is_empty() {
            return Err(AppError::BadRequest("This course has no module.".to_string()));
        }

        let total = modules.len() as i64;
        let completed = modules.iter().filter(|m| m.is_completed()).count() as i64;
        if completed < total {
            return Err(AppError::CourseIncomplete { completed, total });
        }

        let certificate_url = self.certificate.url_for(user_id, course_id);
        let (enrollment, certificate) = self
            .enrollment_repo
            .complete_course(user_id, course_id, &certificate_url)
            .await?
            .or_conflict("Course already completed")?;

        counter!("lms_course_completions_total").increment(1);
        tracing::info!(user_id, course_id, "Course completed");

        Ok(CourseCompletion {
            enrollment,
            certificate,
            completed,
            total,
        })
    }

    async fn find_module(&self, module_id: i64) -> Result<CourseModule> {
        self.module_repo
            .find_by_id(module_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Module not found".to_string()))
    }

    async fn require_enrollment(&self, user_id: i64, course_id: i64) -> Result<Enrollment> {
        self.enrollment_repo
            .find(user_id, course_id)
            .await?
            .ok_or_else(|| AppError::Unauthorized("User is not enrolled in this course".to_string()))
    }

    async fn enrollment_or_bad_request(&self, user_id: i64, course_id: i64) -> Result<Enrollment> {
        self.enrollment_repo
            .find(user_id, course_id)
            .await?
            .ok_or_else(|| AppError::BadRequest(NO_ENROLLMENT.to_string()))
    }

    async fn module_entries(&self, user_id: i64, course_id: i64) -> Result<Vec<ModuleProgressEntry>> {
        let modules = self.module_repo.list_by_course(course_id).await?;
        let mut rows: HashMap<i64, UserModuleProgress> = self
            .repo
            .list_module_progress_in_course(user_id, course_id)
            .await?
            .into_iter()
            .map(|p| (p.module_id, p))
            .collect();

        Ok(modules
            .into_iter()
            .map(|module| {
                let progress = rows.remove(&module.id);
                ModuleProgressEntry { module, progress }
            })
            .collect())
    }
}
