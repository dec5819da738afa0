//! Server initialization and routing

use crate::api;
use crate::config::Config;
use crate::domains::assessment::service::{AttemptService, QuizService};
use crate::domains::catalog::service::{
    CategoryService, ContentService, CourseService, ModuleService, TemplateService,
};
use crate::domains::commerce::service::{OrderService, SavedCourseService};
use crate::domains::identity::service::AuthService;
use crate::domains::learning::service::{
    EnrollmentRepositoryBundle, EnrollmentService, ProgressService,
};
use crate::domains::{self, DomainRouterState};
use crate::jwt::JwtManager;
use crate::middleware::{
    normalize_error_response, require_auth_middleware, AuthMiddlewareState, ObservabilityLayer,
};
use crate::repository::{
    attempt::AttemptRepositoryImpl, category::CategoryRepositoryImpl,
    content::ContentRepositoryImpl, course::CourseRepositoryImpl,
    course_module::ModuleRepositoryImpl, enrollment::EnrollmentRepositoryImpl,
    order::OrderRepositoryImpl, progress::ProgressRepositoryImpl, quiz::QuizRepositoryImpl,
    saved_course::SavedCourseRepositoryImpl, template::TemplateRepositoryImpl,
    user::UserRepositoryImpl,
};
use crate::state::{HasAssessment, HasCatalog, HasCommerce, HasLearning, HasServices};
use anyhow::{Context, Result};
use axum::{
    http::{header, Method, StatusCode},
    routing::get,
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use sqlx::{mysql::MySqlPoolOptions, MySqlPool};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::info;

type CourseSvc = CourseService<
    CourseRepositoryImpl,
    CategoryRepositoryImpl,
    UserRepositoryImpl,
    ModuleRepositoryImpl,
>;
type ModuleSvc = ModuleService<
    ModuleRepositoryImpl,
    CourseRepositoryImpl,
    ContentRepositoryImpl,
    QuizRepositoryImpl,
>;
type EnrollmentSvc = EnrollmentService<
    EnrollmentRepositoryImpl,
    UserRepositoryImpl,
    CourseRepositoryImpl,
    ModuleRepositoryImpl,
    ContentRepositoryImpl,
    QuizRepositoryImpl,
    ProgressRepositoryImpl,
>;
type ProgressSvc = ProgressService<
    ProgressRepositoryImpl,
    EnrollmentRepositoryImpl,
    ModuleRepositoryImpl,
    ContentRepositoryImpl,
>;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub db_pool: MySqlPool,
    pub jwt_manager: JwtManager,
    pub auth_service: Arc<AuthService<UserRepositoryImpl>>,
    pub category_service: Arc<CategoryService<CategoryRepositoryImpl>>,
    pub course_service: Arc<CourseSvc>,
    pub module_service: Arc<ModuleSvc>,
    pub content_service:
        Arc<ContentService<ContentRepositoryImpl, ModuleRepositoryImpl, QuizRepositoryImpl>>,
    pub template_service: Arc<TemplateService<TemplateRepositoryImpl>>,
    pub enrollment_service: Arc<EnrollmentSvc>,
    pub progress_service: Arc<ProgressSvc>,
    pub quiz_service: Arc<QuizService<QuizRepositoryImpl, ContentRepositoryImpl>>,
    pub attempt_service: Arc<AttemptService<AttemptRepositoryImpl, QuizRepositoryImpl>>,
    pub order_service: Arc<OrderService<OrderRepositoryImpl, CourseRepositoryImpl>>,
    pub saved_course_service:
        Arc<SavedCourseService<SavedCourseRepositoryImpl, CourseRepositoryImpl>>,
}

impl AppState {
    /// Wire every repository and service over one connection pool
    pub fn new(config: Config, db_pool: MySqlPool) -> Self {
        let jwt_manager = JwtManager::new(config.jwt.clone());

        let user_repo = Arc::new(UserRepositoryImpl::new(db_pool.clone()));
        let category_repo = Arc::new(CategoryRepositoryImpl::new(db_pool.clone()));
        let course_repo = Arc::new(CourseRepositoryImpl::new(db_pool.clone()));
        let module_repo = Arc::new(ModuleRepositoryImpl::new(db_pool.clone()));
        let content_repo = Arc::new(ContentRepositoryImpl::new(db_pool.clone()));
        let template_repo = Arc::new(TemplateRepositoryImpl::new(db_pool.clone()));
        let quiz_repo = Arc::new(QuizRepositoryImpl::new(db_pool.clone()));
        let attempt_repo = Arc::new(AttemptRepositoryImpl::new(db_pool.clone()));
        let enrollment_repo = Arc::new(EnrollmentRepositoryImpl::new(db_pool.clone()));
        let progress_repo = Arc::new(ProgressRepositoryImpl::new(db_pool.clone()));
        let order_repo = Arc::new(OrderRepositoryImpl::new(db_pool.clone()));
        let saved_course_repo = Arc::new(SavedCourseRepositoryImpl::new(db_pool.clone()));

        let auth_service = AuthService::new(user_repo.clone(), jwt_manager.clone());
        let category_service = CategoryService::new(category_repo.clone());
        let course_service = CourseService::new(
            course_repo.clone(),
            category_repo,
            user_repo.clone(),
            module_repo.clone(),
        );
        let module_service = ModuleService::new(
            module_repo.clone(),
            course_repo.clone(),
            content_repo.clone(),
            quiz_repo.clone(),
        );
        let content_service =
            ContentService::new(content_repo.clone(), module_repo.clone(), quiz_repo.clone());
        let template_service = TemplateService::new(template_repo);
        let enrollment_service = EnrollmentService::new(EnrollmentRepositoryBundle {
            enrollment: enrollment_repo.clone(),
            user: user_repo,
            course: course_repo.clone(),
            module: module_repo.clone(),
            content: content_repo.clone(),
            quiz: quiz_repo.clone(),
            progress: progress_repo.clone(),
        });
        let progress_service = ProgressService::new(
            progress_repo,
            enrollment_repo,
            module_repo,
            content_repo.clone(),
            config.certificate.clone(),
        );
        let quiz_service = QuizService::new(quiz_repo.clone(), content_repo);
        let attempt_service = AttemptService::new(attempt_repo, quiz_repo);
        let order_service = OrderService::new(order_repo, course_repo.clone());
        let saved_course_service = SavedCourseService::new(saved_course_repo, course_repo);

        Self {
            config: Arc::new(config),
            db_pool,
            jwt_manager,
            auth_service: Arc::new(auth_service),
            category_service: Arc::new(category_service),
            course_service: Arc::new(course_service),
            module_service: Arc::new(module_service),
            content_service: Arc::new(content_service),
            template_service: Arc::new(template_service),
            enrollment_service: Arc::new(enrollment_service),
            progress_service: Arc::new(progress_service),
            quiz_service: Arc::new(quiz_service),
            attempt_service: Arc::new(attempt_service),
            order_service: Arc::new(order_service),
            saved_course_service: Arc::new(saved_course_service),
        }
    }
}

impl HasServices for AppState {
    type UserRepo = UserRepositoryImpl;
    type CategoryRepo = CategoryRepositoryImpl;
    type CourseRepo = CourseRepositoryImpl;
    type ModuleRepo = ModuleRepositoryImpl;
    type ContentRepo = ContentRepositoryImpl;
    type TemplateRepo = TemplateRepositoryImpl;
    type QuizRepo = QuizRepositoryImpl;
    type AttemptRepo = AttemptRepositoryImpl;
    type EnrollmentRepo = EnrollmentRepositoryImpl;
    type ProgressRepo = ProgressRepositoryImpl;
    type OrderRepo = OrderRepositoryImpl;
    type SavedCourseRepo = SavedCourseRepositoryImpl;

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
        sqlx::query("SELECT 1").execute(&self.db_pool).await.is_ok()
    }
}

impl HasCatalog for AppState {
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

impl HasLearning for AppState {
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

impl HasAssessment for AppState {
    fn quiz_service(&self) -> &QuizService<Self::QuizRepo, Self::ContentRepo> {
        &self.quiz_service
    }

    fn attempt_service(&self) -> &AttemptService<Self::AttemptRepo, Self::QuizRepo> {
        &self.attempt_service
    }
}

impl HasCommerce for AppState {
    fn order_service(&self) -> &OrderService<Self::OrderRepo, Self::CourseRepo> {
        &self.order_service
    }

    fn saved_course_service(
        &self,
    ) -> &SavedCourseService<Self::SavedCourseRepo, Self::CourseRepo> {
        &self.saved_course_service
    }
}

/// Open the MySQL pool described by the configuration
pub async fn connect_pool(config: &Config) -> Result<MySqlPool> {
    MySqlPoolOptions::new()
        .max_connections(config.database.max_connections)
        .min_connections(config.database.min_connections)
        .connect(&config.database.url)
        .await
        .context("Failed to connect to database")
}

/// Run the server
pub async fn run(config: Config, prometheus_handle: Option<PrometheusHandle>) -> Result<()> {
    let db_pool = connect_pool(&config).await?;
    info!("Connected to database");

    let http_addr = config.http_addr();
    let state = AppState::new(config, db_pool);
    let app = build_router(state, prometheus_handle);

    let listener = TcpListener::bind(&http_addr).await?;
    info!("HTTP server started on {}", http_addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("HTTP server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
}

/// Build the HTTP router with generic state type
///
/// Shared by the production `AppState` and the in-memory test state.
/// Everything except registration, login and the ops endpoints sits
/// behind the bearer-token guard.
pub fn build_router<S>(state: S, prometheus_handle: Option<PrometheusHandle>) -> Router
where
    S: DomainRouterState,
{
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    let auth_state = AuthMiddlewareState::new(state.jwt_manager().clone());
    let timeout = Duration::from_secs(state.config().request_timeout_secs);

    let public_routes = Router::new()
        .route("/health", get(api::health::health))
        .route("/ready", get(api::health::ready::<S>))
        .route(
            "/metrics",
            get(api::metrics::metrics_handler).with_state(Arc::new(prometheus_handle)),
        )
        .merge(domains::identity::routes::public_routes::<S>());

    let protected_routes = Router::new()
        .merge(domains::identity::routes::protected_routes::<S>())
        .merge(domains::catalog::routes::protected_routes::<S>())
        .merge(domains::learning::routes::protected_routes::<S>())
        .merge(domains::assessment::routes::protected_routes::<S>())
        .merge(domains::commerce::routes::protected_routes::<S>())
        .route_layer(axum::middleware::from_fn_with_state(
            auth_state,
            require_auth_middleware,
        ));

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            timeout,
        ))
        .layer(axum::middleware::from_fn(normalize_error_response))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(ObservabilityLayer)
        .with_state(state)
}
