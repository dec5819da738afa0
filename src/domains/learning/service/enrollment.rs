//! Enrollment business logic and enrolled-course reads

use crate::domain::{
    Certificate, ContentProgressEntry, CourseOutline, CreateEnrollmentInput, Enrollment, MyCourse,
    MyModule, UserContentProgress, UserModuleProgress,
};
use crate::domains::catalog::service::module::course_outline;
use crate::error::{AppError, Result};
use crate::repository::{
    ContentRepository, CourseRepository, EnrollmentRepository, ModuleRepository,
    ProgressRepository, QuizRepository, UserRepository,
};
use std::collections::HashMap;
use std::sync::Arc;
use validator::Validate;

/// Repository bundle for EnrollmentService
pub struct EnrollmentRepositoryBundle<E, U, C, M, T, Q, P>
where
    E: EnrollmentRepository,
    U: UserRepository,
    C: CourseRepository,
    M: ModuleRepository,
    T: ContentRepository,
    Q: QuizRepository,
    P: ProgressRepository,
{
    pub enrollment: Arc<E>,
    pub user: Arc<U>,
    pub course: Arc<C>,
    pub module: Arc<M>,
    pub content: Arc<T>,
    pub quiz: Arc<Q>,
    pub progress: Arc<P>,
}

pub struct EnrollmentService<E, U, C, M, T, Q, P>
where
    E: EnrollmentRepository,
    U: UserRepository,
    C: CourseRepository,
    M: ModuleRepository,
    T: ContentRepository,
    Q: QuizRepository,
    P: ProgressRepository,
{
    repo: Arc<E>,
    user_repo: Arc<U>,
    course_repo: Arc<C>,
    module_repo: Arc<M>,
    content_repo: Arc<T>,
    quiz_repo: Arc<Q>,
    progress_repo: Arc<P>,
}

impl<E, U, C, M, T, Q, P> EnrollmentService<E, U, C, M, T, Q, P>
where
    E: EnrollmentRepository,
    U: UserRepository,
    C: CourseRepository,
    M: ModuleRepository,
    T: ContentRepository,
    Q: QuizRepository,
    P: ProgressRepository,
{
    pub fn new(repos: EnrollmentRepositoryBundle<E, U, C, M, T, Q, P>) -> Self {
        Self {
            repo: repos.enrollment,
            user_repo: repos.user,
            course_repo: repos.course,
            module_repo: repos.module,
            content_repo: repos.content,
            quiz_repo: repos.quiz,
            progress_repo: repos.progress,
        }
    }

    pub async fn create(&self, input: CreateEnrollmentInput) -> Result<Enrollment> {
        input.validate()?;
        self.ensure_user(input.user_id).await?;
        if self.course_repo.find_by_id(input.course_id).await?.is_none() {
            return Err(AppError::NotFound("Course not found".to_string()));
        }

        let enrollment = self
            .repo
            .create(&input)
            .await?
            .or_conflict("User is already enrolled in this course")?;

        tracing::info!(
            user_id = enrollment.user_id,
            course_id = enrollment.course_id,
            "Enrollment created"
        );
        Ok(enrollment)
    }

    pub async fn list(&self) -> Result<Vec<Enrollment>> {
        self.repo.list().await
    }

    /// Courses a user is enrolled in, with modules and contents
    pub async fn list_user_courses(&self, user_id: i64) -> Result<Vec<CourseOutline>> {
        self.ensure_user(user_id).await?;

        let overviews = self.course_repo.list_enrolled_overviews(user_id).await?;
        let mut courses = Vec::with_capacity(overviews.len());
        for overview in overviews {
            let modules = course_outline(
                self.module_repo.as_ref(),
                self.content_repo.as_ref(),
                self.quiz_repo.as_ref(),
                overview.course.id,
            )
            .await?;
            courses.push(CourseOutline { overview, modules });
        }
        Ok(courses)
    }

    /// The caller's enrolled courses with their own progress rows attached
    pub async fn my_courses(&self, user_id: i64) -> Result<Vec<MyCourse>> {
        let enrollments = self.repo.list_by_user(user_id).await?;
        let mut courses = Vec::with_capacity(enrollments.len());

        for enrollment in enrollments {
            let Some(course) = self.course_repo.find_by_id(enrollment.course_id).await? else {
                continue;
            };

            let mut module_rows: HashMap<i64, UserModuleProgress> = self
                .progress_repo
                .list_module_progress_in_course(user_id, course.id)
                .await?
                .into_iter()
                .map(|p| (p.module_id, p))
                .collect();

            let mut modules = Vec::new();
            for module in self.module_repo.list_by_course(course.id).await? {
                let mut content_rows: HashMap<i64, UserContentProgress> = self
                    .progress_repo
                    .list_content_progress_in_module(user_id, module.id)
                    .await?
                    .into_iter()
                    .map(|p| (p.content_id, p))
                    .collect();

                let contents = self
                    .content_repo
                    .list_by_module(module.id)
                    .await?
                    .into_iter()
                    .map(|content| {
                        let progress = content_rows.remove(&content.id);
                        ContentProgressEntry { content, progress }
                    })
                    .collect();

                let progress = module_rows.remove(&module.id);
                modules.push(MyModule {
                    module,
                    progress,
                    contents,
                });
            }

            courses.push(MyCourse {
                course,
                enrollment,
                modules,
            });
        }

        Ok(courses)
    }

    pub async fn certificates(&self, user_id: i64) -> Result<Vec<Certificate>> {
        self.repo.list_certificates(user_id).await
    }

    async fn ensure_user(&self, user_id: i64) -> Result<()> {
        match self.user_repo.find_by_id(user_id).await? {
            Some(_) => Ok(()),
            None => Err(AppError::NotFound("User not found".to_string())),
        }
    }
}
