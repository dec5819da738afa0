//! Application state traits for dependency injection
//!
//! Handlers are generic over these traits so the production `AppState`
//! and the in-memory test state share the same router.

use crate::config::Config;
use crate::domains::assessment::service::{AttemptService, QuizService};
use crate::domains::catalog::service::{
    CategoryService, ContentService, CourseService, ModuleService, TemplateService,
};
use crate::domains::commerce::service::{OrderService, SavedCourseService};
use crate::domains::identity::service::AuthService;
use crate::domains::learning::service::{EnrollmentService, ProgressService};
use crate::jwt::JwtManager;
use crate::repository::{
    AttemptRepository, CategoryRepository, ContentRepository, CourseRepository,
    EnrollmentRepository, ModuleRepository, OrderRepository, ProgressRepository, QuizRepository,
    SavedCourseRepository, TemplateRepository, UserRepository,
};

/// Core state: configuration, token handling, and the repository types
/// every domain service is built from.
pub trait HasServices: Clone + Send + Sync + 'static {
    type UserRepo: UserRepository;
    type CategoryRepo: CategoryRepository;
    type CourseRepo: CourseRepository;
    type ModuleRepo: ModuleRepository;
    type ContentRepo: ContentRepository;
    type TemplateRepo: TemplateRepository;
    type QuizRepo: QuizRepository;
    type AttemptRepo: AttemptRepository;
    type EnrollmentRepo: EnrollmentRepository;
    type ProgressRepo: ProgressRepository;
    type OrderRepo: OrderRepository;
    type SavedCourseRepo: SavedCourseRepository;

    /// Get the application configuration
    fn config(&self) -> &Config;

    /// Get the JWT manager
    fn jwt_manager(&self) -> &JwtManager;

    /// Get the registration/login service
    fn auth_service(&self) -> &AuthService<Self::UserRepo>;

    /// Check if the database answers
    fn check_ready(&self) -> impl std::future::Future<Output = bool> + Send;
}

/// Course catalog services
pub trait HasCatalog: HasServices {
    fn category_service(&self) -> &CategoryService<Self::CategoryRepo>;

    fn course_service(
        &self,
    ) -> &CourseService<Self::CourseRepo, Self::CategoryRepo, Self::UserRepo, Self::ModuleRepo>;

    fn module_service(
        &self,
    ) -> &ModuleService<Self::ModuleRepo, Self::CourseRepo, Self::ContentRepo, Self::QuizRepo>;

    fn content_service(
        &self,
    ) -> &ContentService<Self::ContentRepo, Self::ModuleRepo, Self::QuizRepo>;

    fn template_service(&self) -> &TemplateService<Self::TemplateRepo>;
}

/// Enrollment and progress services
pub trait HasLearning: HasServices {
    fn enrollment_service(
        &self,
    ) -> &EnrollmentService<
        Self::EnrollmentRepo,
        Self::UserRepo,
        Self::CourseRepo,
        Self::ModuleRepo,
        Self::ContentRepo,
        Self::QuizRepo,
        Self::ProgressRepo,
    >;

    fn progress_service(
        &self,
    ) -> &ProgressService<
        Self::ProgressRepo,
        Self::EnrollmentRepo,
        Self::ModuleRepo,
        Self::ContentRepo,
    >;
}

/// Quiz authoring and attempt services
pub trait HasAssessment: HasServices {
    fn quiz_service(&self) -> &QuizService<Self::QuizRepo, Self::ContentRepo>;

    fn attempt_service(&self) -> &AttemptService<Self::AttemptRepo, Self::QuizRepo>;
}

/// Order, cart and wishlist services
pub trait HasCommerce: HasServices {
    fn order_service(&self) -> &OrderService<Self::OrderRepo, Self::CourseRepo>;

    fn saved_course_service(&self) -> &SavedCourseService<Self::SavedCourseRepo, Self::CourseRepo>;
}
