//! HTTP-level tests: the production router over in-memory repositories

mod identity_http_test;

use super::{
    TestAttemptRepository, TestCategoryRepository, TestContentRepository, TestCourseRepository,
    TestDb, TestEnrollmentRepository, TestModuleRepository, TestOrderRepository,
    TestProgressRepository, TestQuizRepository, TestSavedCourseRepository,
    TestTemplateRepository, TestUserRepository,
};
use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use lms_core::config::{
    CertificateConfig, Config, DatabaseConfig, JwtConfig, TelemetryConfig,
};
use lms_core::domain::User;
use lms_core::domains::assessment::service::{AttemptService, QuizService};
use lms_core::domains::catalog::service::{
    CategoryService, ContentService, CourseService, ModuleService, TemplateService,
};
use lms_core::domains::commerce::service::{OrderService, SavedCourseService};
use lms_core::domains::identity::service::AuthService;
use lms_core::domains::learning::service::{
    EnrollmentRepositoryBundle, EnrollmentService, ProgressService,
};
use lms_core::jwt::JwtManager;
use lms_core::state::{HasAssessment, HasCatalog, HasCommerce, HasLearning, HasServices};
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

type TestCourseService = CourseService<
    TestCourseRepository,
    TestCategoryRepository,
    TestUserRepository,
    TestModuleRepository,
>;
type TestModuleService = ModuleService<
    TestModuleRepository,
    TestCourseRepository,
    TestContentRepository,
    TestQuizRepository,
>;
type TestEnrollmentService = EnrollmentService<
    TestEnrollmentRepository,
    TestUserRepository,
    TestCourseRepository,
    TestModuleRepository,
    TestContentRepository,
    TestQuizRepository,
    TestProgressRepository,
>;
type TestProgressService = ProgressService<
    TestProgressRepository,
    TestEnrollmentRepository,
    TestModuleRepository,
    TestContentRepository,
>;

/// Create a test configuration
pub fn create_test_config() -> Config {
    Config {
        http_host: "127.0.0.1".to_string(),
        http_port: 8080,
        request_timeout_secs: 30,
        database: DatabaseConfig {
            url: "mysql://localhost/lms_test".to_string(),
            max_connections: 1,
            min_connections: 1,
        },
        jwt: JwtConfig {
            secret: "test-secret-key-for-jwt-signing-must-be-long".to_string(),
            issuer: "https://lms.test".to_string(),
            access_token_ttl_secs: 3600,
        },
        telemetry: TelemetryConfig::default(),
        certificate: CertificateConfig {
            base_url: "https://certs.lms.test".to_string(),
        },
    }
}

/// Router state backed by a shared `TestDb`
#[derive(Clone)]
pub struct TestAppState {
    pub db: Arc<TestDb>,
    pub config: Arc<Config>,
    pub jwt_manager: JwtManager,
    auth_service: Arc<AuthService<TestUserRepository>>,
    category_service: Arc<CategoryService<TestCategoryRepository>>,
    course_service: Arc<TestCourseService>,
    module_service: Arc<TestModuleService>,
    content_service:
        Arc<ContentService<TestContentRepository, TestModuleRepository, TestQuizRepository>>,
    template_service: Arc<TemplateService<TestTemplateRepository>>,
    enrollment_service: Arc<TestEnrollmentService>,
    progress_service: Arc<TestProgressService>,
    quiz_service: Arc<QuizService<TestQuizRepository, TestContentRepository>>,
    attempt_service: Arc<AttemptService<TestAttemptRepository, TestQuizRepository>>,
    order_service: Arc<OrderService<TestOrderRepository, TestCourseRepository>>,
    saved_course_service: Arc<SavedCourseService<TestSavedCourseRepository, TestCourseRepository>>,
}

impl Default for TestAppState {
    fn default() -> Self {
        Self::new()
    }
}

impl TestAppState {
    pub fn new() -> Self {
        let config = create_test_config();
        let db = TestDb::new();
        let jwt_manager = JwtManager::new(config.jwt.clone());

        let user_repo = Arc::new(TestUserRepository::new(db.clone()));
        let category_repo = Arc::new(TestCategoryRepository::new(db.clone()));
        let course_repo = Arc::new(TestCourseRepository::new(db.clone()));
        let module_repo = Arc::new(TestModuleRepository::new(db.clone()));
        let content_repo = Arc::new(TestContentRepository::new(db.clone()));
        let template_repo = Arc::new(TestTemplateRepository::new(db.clone()));
        let quiz_repo = Arc::new(TestQuizRepository::new(db.clone()));
        let attempt_repo = Arc::new(TestAttemptRepository::new(db.clone()));
        let enrollment_repo = Arc::new(TestEnrollmentRepository::new(db.clone()));
        let progress_repo = Arc::new(TestProgressRepository::new(db.clone()));
        let order_repo = Arc::new(TestOrderRepository::new(db.clone()));
        let saved_course_repo = Arc::new(TestSavedCourseRepository::new(db.clone()));

        Self {
            auth_service: Arc::new(AuthService::new(user_repo.clone(), jwt_manager.clone())),
            category_service: Arc::new(CategoryService::new(category_repo.clone())),
            course_service: Arc::new(CourseService::new(
                course_repo.clone(),
                category_repo,
                user_repo.clone(),
                module_repo.clone(),
            )),
            module_service: Arc::new(ModuleService::new(
                module_repo.clone(),
                course_repo.clone(),
                content_repo.clone(),
                quiz_repo.clone(),
            )),
            content_service: Arc::new(ContentService::new(
                content_repo.clone(),
                module_repo.clone(),
                quiz_repo.clone(),
            )),
            template_service: Arc::new(TemplateService::new(template_repo)),
            enrollment_service: Arc::new(EnrollmentService::new(EnrollmentRepositoryBundle {
                enrollment: enrollment_repo.clone(),
                user: user_repo,
                course: course_repo.clone(),
                module: module_repo.clone(),
                content: content_repo.clone(),
                quiz: quiz_repo.clone(),
                progress: progress_repo.clone(),
            })),
            progress_service: Arc::new(ProgressService::new(
                progress_repo,
                enrollment_repo,
                module_repo,
                content_repo.clone(),
                config.certificate.clone(),
            )),
            quiz_service: Arc::new(QuizService::new(quiz_repo.clone(), content_repo)),
            attempt_service: Arc::new(AttemptService::new(attempt_repo, quiz_repo)),
            order_service: Arc::new(OrderService::new(order_repo, course_repo.clone())),
            saved_course_service: Arc::new(SavedCourseService::new(saved_course_repo, course_repo)),
            db,
            config: Arc::new(config),
            jwt_manager,
        }
    }

    /// Bearer token for a seeded user
    pub fn token_for(&self, user: &User) -> String {
        self.jwt_manager
            .create_access_token(user.id, &user.email, user.role)
            .unwrap()
    }
}

impl HasServices for TestAppState {
    type UserRepo = TestUserRepository;
    type CategoryRepo = TestCategoryRepository;
    type CourseRepo = TestCourseRepository;
    type ModuleRepo = TestModuleRepository;
    type ContentRepo = TestContentRepository;
    type TemplateRepo = TestTemplateRepository;
    type QuizRepo = TestQuizRepository;
    type AttemptRepo = TestAttemptRepository;
    type EnrollmentRepo = TestEnrollmentRepository;
    type ProgressRepo = TestProgressRepository;
    type OrderRepo = TestOrderRepository;
    type SavedCourseRepo = TestSavedCourseRepository;

    fn config(&self) -> &Config {
        &self.config
    }

    fn jwt_manager(&self) -> &JwtManager {
        &self.jwt_manager
    }

    fn auth_service(&self) -> &AuthService<Self::UserRepo> {
        &self.auth_service
    }

    async fn check_ready(&self) -> bool {
        true
    }
}

impl HasCatalog for TestAppState {
    fn category_service(&self) -> &CategoryService<Self::CategoryRepo> {
        &self.category_service
    }

    fn course_service(
        &self,
    ) -> &CourseService<Self::CourseRepo, Self::CategoryRepo, Self::UserRepo, Self::ModuleRepo>
    {
        &self.course_service
    }

    fn module_service(
        &self,
    ) -> &ModuleService<Self::ModuleRepo, Self::CourseRepo, Self::ContentRepo, Self::QuizRepo> {
        &self.module_service
    }

    fn content_service(
        &self,
    ) -> &ContentService<Self::ContentRepo, Self::ModuleRepo, Self::QuizRepo> {
        &self.content_service
    }

    fn template_service(&self) -> &TemplateService<Self::TemplateRepo> {
        &self.template_service
    }
}

impl HasLearning for TestAppState {
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
    > {
        &self.enrollment_service
    }

    fn progress_service(
        &self,
    ) -> &ProgressService<
        Self::ProgressRepo,
        Self::EnrollmentRepo,
        Self::ModuleRepo,
        Self::ContentRepo,
    > {
        &self.progress_service
    }
}

impl HasAssessment for TestAppState {
    fn quiz_service(&self) -> &QuizService<Self::QuizRepo, Self::ContentRepo> {
        &self.quiz_service
    }

    fn attempt_service(&self) -> &AttemptService<Self::AttemptRepo, Self::QuizRepo> {
        &self.attempt_service
    }
}

impl HasCommerce for TestAppState {
    fn order_service(&self) -> &OrderService<Self::OrderRepo, Self::CourseRepo> {
        &self.order_service
    }

    fn saved_course_service(
        &self,
    ) -> &SavedCourseService<Self::SavedCourseRepo, Self::CourseRepo> {
        &self.saved_course_service
    }
}

/// Build the production router over the test state
pub fn build_test_router(state: TestAppState) -> Router {
    lms_core::server::build_router(state, None)
}

async fn send(
    app: &Router,
    method: Method,
    path: &str,
    token: Option<&str>,
    body: Body,
) -> (StatusCode, Value) {
    let mut builder = Request::builder()
        .method(method)
        .uri(path)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }

    let response = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

/// GET and return the status plus the full response envelope
pub async fn get_json(app: &Router, path: &str, token: Option<&str>) -> (StatusCode, Value) {
    send(app, Method::GET, path, token, Body::empty()).await
}

pub async fn post_json<B: Serialize>(
    app: &Router,
    path: &str,
    body: &B,
    token: Option<&str>,
) -> (StatusCode, Value) {
    let body = Body::from(serde_json::to_vec(body).unwrap());
    send(app, Method::POST, path, token, body).await
}

pub async fn put_json<B: Serialize>(
    app: &Router,
    path: &str,
    body: &B,
    token: Option<&str>,
) -> (StatusCode, Value) {
    let body = Body::from(serde_json::to_vec(body).unwrap());
    send(app, Method::PUT, path, token, body).await
}

pub async fn delete_json(app: &Router, path: &str, token: Option<&str>) -> (StatusCode, Value) {
    send(app, Method::DELETE, path, token, Body::empty()).await
}

/// POST a raw (possibly malformed) body
pub async fn post_raw(
    app: &Router,
    path: &str,
    body: &'static str,
    token: Option<&str>,
) -> (StatusCode, Value) {
    send(app, Method::POST, path, token, Body::from(body)).await
}
