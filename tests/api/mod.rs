//! API integration tests infrastructure
//!
//! In-memory repositories sharing one `TestDb`. Each table enforces the
//! same unique keys as the MySQL schema, so duplicate inserts surface as
//! `InsertOutcome::AlreadyExists` exactly like the SQL implementations.

pub mod http;

use async_trait::async_trait;
use chrono::Utc;
use lms_core::domain::{
    AttemptStatus, Category, Certificate, Content, Course, CourseModule, CourseOverview,
    CreateContentInput, CreateCourseInput, CreateEnrollmentInput, CreateModuleInput,
    CreateQuizInput, Enrollment, NewOrder, NewUser, NewUserQuizAnswer, Order, OrderWithPayment,
    Payment, PaymentMethod, Question, QuestionInput, QuestionType, QuestionUpdateInput,
    QuestionWithAnswers, Quiz, QuizAnswer, QuizAttempt, Role, SavedCourse, SavedListKind,
    Template, UpdateContentInput, UpdateCourseInput, UpdateModuleInput, User,
    UserContentProgress, UserModuleProgress, UserQuizAnswer, UserSummary,
};
use lms_core::error::{AppError, Result};
use lms_core::repository::{
    AttemptRepository, CategoryRepository, ContentRepository, CourseRepository,
    EnrollmentRepository, InsertOutcome, ModuleRepository, OrderRepository, ProgressRepository,
    QuizRepository, SavedCourseRepository, TemplateRepository, UserRepository,
};
use std::collections::HashSet;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

// ============================================================================
// Shared tables
// ============================================================================

#[derive(Default)]
pub struct TestDb {
    next_id: AtomicI64,
    pub users: RwLock<Vec<User>>,
    pub categories: RwLock<Vec<Category>>,
    pub courses: RwLock<Vec<Course>>,
    pub modules: RwLock<Vec<CourseModule>>,
    pub contents: RwLock<Vec<Content>>,
    pub templates: RwLock<Vec<Template>>,
    pub quizzes: RwLock<Vec<Quiz>>,
    pub questions: RwLock<Vec<Question>>,
    pub answers: RwLock<Vec<QuizAnswer>>,
    pub attempts: RwLock<Vec<QuizAttempt>>,
    pub user_answers: RwLock<Vec<UserQuizAnswer>>,
    pub enrollments: RwLock<Vec<Enrollment>>,
    pub content_progress: RwLock<Vec<UserContentProgress>>,
    pub module_progress: RwLock<Vec<UserModuleProgress>>,
    pub certificates: RwLock<Vec<Certificate>>,
    pub payment_methods: RwLock<Vec<PaymentMethod>>,
    pub orders: RwLock<Vec<Order>>,
    pub payments: RwLock<Vec<Payment>>,
    pub carts: RwLock<Vec<SavedCourse>>,
    pub wishlists: RwLock<Vec<SavedCourse>>,
}

impl TestDb {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    fn next_id(&self) -> i64 {
        self.next_id.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn saved_table(&self, kind: SavedListKind) -> &RwLock<Vec<SavedCourse>> {
        match kind {
            SavedListKind::Cart => &self.carts,
            SavedListKind::Wishlist => &self.wishlists,
        }
    }

    async fn overview(&self, course: Course) -> CourseOverview {
        let category_name = self
            .categories
            .read()
            .await
            .iter()
            .find(|c| c.id == course.category_id)
            .map(|c| c.name.clone())
            .unwrap_or_default();
        let instructor = self
            .users
            .read()
            .await
            .iter()
            .find(|u| u.id == course.instructor_id)
            .map(UserSummary::from)
            .unwrap_or(UserSummary {
                id: course.instructor_id,
                name: String::new(),
                email: String::new(),
            });
        let total_students = self
            .enrollments
            .read()
            .await
            .iter()
            .filter(|e| e.course_id == course.id)
            .count() as i64;

        CourseOverview {
            course,
            category_name,
            instructor,
            total_students,
        }
    }

    async fn questions_with_answers(&self, quiz_id: i64) -> Vec<QuestionWithAnswers> {
        let questions = self.questions.read().await;
        let answers = self.answers.read().await;
        questions
            .iter()
            .filter(|q| q.quiz_id == quiz_id)
            .map(|q| QuestionWithAnswers {
                question: q.clone(),
                answers: answers
                    .iter()
                    .filter(|a| a.question_id == q.id)
                    .cloned()
                    .collect(),
            })
            .collect()
    }

    // ------------------------------------------------------------------
    // Seeding helpers
    // ------------------------------------------------------------------

    pub async fn seed_user(&self, name: &str, email: &str, role: Role) -> User {
        let user = User {
            id: self.next_id(),
            name: name.to_string(),
            email: email.to_string(),
            role,
            ..Default::default()
        };
        self.users.write().await.push(user.clone());
        user
    }

    pub async fn seed_category(&self, name: &str) -> Category {
        let category = Category {
            id: self.next_id(),
            name: name.to_string(),
        };
        self.categories.write().await.push(category.clone());
        category
    }

    pub async fn seed_course(&self, title: &str, price: i64, category_id: i64, instructor_id: i64) -> Course {
        let course = Course {
            id: self.next_id(),
            title: title.to_string(),
            price,
            level: "Beginner".to_string(),
            language: "English".to_string(),
            duration: "10h".to_string(),
            requirements: "None".to_string(),
            learning_outcomes: "Everything".to_string(),
            category_id,
            instructor_id,
            ..Default::default()
        };
        self.courses.write().await.push(course.clone());
        course
    }

    pub async fn seed_module(&self, course_id: i64, title: &str, position: i32) -> CourseModule {
        let module = CourseModule {
            id: self.next_id(),
            title: title.to_string(),
            position,
            course_id,
            ..Default::default()
        };
        self.modules.write().await.push(module.clone());
        module
    }

    pub async fn seed_content(&self, module_id: i64, title: &str, position: i32) -> Content {
        let content = Content {
            id: self.next_id(),
            title: title.to_string(),
            content_url: format!("https://cdn.example.com/{}", title),
            duration: "05:00".to_string(),
            position,
            module_id,
            ..Default::default()
        };
        self.contents.write().await.push(content.clone());
        content
    }

    pub async fn seed_enrollment(&self, user_id: i64, course_id: i64) -> Enrollment {
        let enrollment = Enrollment {
            id: self.next_id(),
            user_id,
            course_id,
            progress_percentage: 0,
            completed_at: None,
            access_expires_at: None,
            created_at: Utc::now(),
        };
        self.enrollments.write().await.push(enrollment.clone());
        enrollment
    }

    pub async fn seed_quiz(&self, content_id: i64, title: &str) -> Quiz {
        let now = Utc::now();
        let quiz = Quiz {
            id: self.next_id(),
            content_id,
            title: title.to_string(),
            created_at: now,
            updated_at: now,
        };
        self.quizzes.write().await.push(quiz.clone());
        quiz
    }

    /// Adds a multiple-choice question; answers are `(text, is_correct)`
    pub async fn seed_question(
        &self,
        quiz_id: i64,
        text: &str,
        answers: &[(&str, bool)],
    ) -> QuestionWithAnswers {
        let question = Question {
            id: self.next_id(),
            quiz_id,
            question_text: text.to_string(),
            question_type: QuestionType::MultipleChoice,
            created_at: Utc::now(),
        };
        let answers: Vec<QuizAnswer> = answers
            .iter()
            .map(|(answer_text, is_correct)| QuizAnswer {
                id: self.next_id(),
                question_id: question.id,
                answer_text: answer_text.to_string(),
                is_correct: *is_correct,
            })
            .collect();

        self.questions.write().await.push(question.clone());
        self.answers.write().await.extend(answers.iter().cloned());
        QuestionWithAnswers { question, answers }
    }

    pub async fn seed_payment_method(&self, id: &str, provider: &str) {
        self.payment_methods.write().await.push(PaymentMethod {
            id: id.to_string(),
            provider: provider.to_string(),
        });
    }
}

// ============================================================================
// Repositories
// ============================================================================

macro_rules! test_repository {
    ($name:ident) => {
        pub struct $name {
            db: Arc<TestDb>,
        }

        impl $name {
            pub fn new(db: Arc<TestDb>) -> Self {
                Self { db }
            }
        }
    };
}

test_repository!(TestUserRepository);
test_repository!(TestCategoryRepository);
test_repository!(TestCourseRepository);
test_repository!(TestModuleRepository);
test_repository!(TestContentRepository);
test_repository!(TestTemplateRepository);
test_repository!(TestQuizRepository);
test_repository!(TestAttemptRepository);
test_repository!(TestEnrollmentRepository);
test_repository!(TestProgressRepository);
test_repository!(TestOrderRepository);
test_repository!(TestSavedCourseRepository);

#[async_trait]
impl UserRepository for TestUserRepository {
    async fn create(&self, input: &NewUser) -> Result<InsertOutcome<User>> {
        let mut users = self.db.users.write().await;
        if users.iter().any(|u| u.email == input.email) {
            return Ok(InsertOutcome::AlreadyExists);
        }
        let user = User {
            id: self.db.next_id(),
            name: input.name.clone(),
            email: input.email.clone(),
            password_hash: input.password_hash.clone(),
            role: input.role,
            ..Default::default()
        };
        users.push(user.clone());
        Ok(InsertOutcome::Created(user))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>> {
        Ok(self.db.users.read().await.iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        Ok(self
            .db
            .users
            .read()
            .await
            .iter()
            .find(|u| u.email == email)
            .cloned())
    }
}

#[async_trait]
impl CategoryRepository for TestCategoryRepository {
    async fn list(&self) -> Result<Vec<Category>> {
        Ok(self.db.categories.read().await.clone())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Category>> {
        Ok(self
            .db
            .categories
            .read()
            .await
            .iter()
            .find(|c| c.id == id)
            .cloned())
    }
}

#[async_trait]
impl CourseRepository for TestCourseRepository {
    async fn create(&self, input: &CreateCourseInput) -> Result<Course> {
        let course = Course {
            id: self.db.next_id(),
            title: input.title.clone(),
            description: input.description.clone(),
            price: input.price,
            level: input.level.clone(),
            language: input.language.clone(),
            duration: input.duration.clone(),
            requirements: input.requirements.clone(),
            learning_outcomes: input.learning_outcomes.clone(),
            category_id: input.category_id,
            instructor_id: input.instructor_id,
            ..Default::default()
        };
        self.db.courses.write().await.push(course.clone());
        Ok(course)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Course>> {
        Ok(self.db.courses.read().await.iter().find(|c| c.id == id).cloned())
    }

    async fn find_overview(&self, id: i64) -> Result<Option<CourseOverview>> {
        let course = self.db.courses.read().await.iter().find(|c| c.id == id).cloned();
        match course {
            Some(course) => Ok(Some(self.db.overview(course).await)),
            None => Ok(None),
        }
    }

    async fn list_overviews(&self) -> Result<Vec<CourseOverview>> {
        let courses = self.db.courses.read().await.clone();
        let mut overviews = Vec::with_capacity(courses.len());
        for course in courses {
            overviews.push(self.db.overview(course).await);
        }
        Ok(overviews)
    }

    async fn list_enrolled_overviews(&self, user_id: i64) -> Result<Vec<CourseOverview>> {
        let enrolled: HashSet<i64> = self
            .db
            .enrollments
            .read()
            .await
            .iter()
            .filter(|e| e.user_id == user_id)
            .map(|e| e.course_id)
            .collect();
        let courses: Vec<Course> = self
            .db
            .courses
            .read()
            .await
            .iter()
            .filter(|c| enrolled.contains(&c.id))
            .cloned()
            .collect();

        let mut overviews = Vec::with_capacity(courses.len());
        for course in courses {
            overviews.push(self.db.overview(course).await);
        }
        Ok(overviews)
    }

    async fn update(&self, id: i64, input: &UpdateCourseInput) -> Result<Course> {
        let mut courses = self.db.courses.write().await;
        let course = courses
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| AppError::NotFound(format!("Course {} not found", id)))?;

        if let Some(title) = &input.title {
            course.title = title.clone();
        }
        if let Some(description) = &input.description {
            course.description = Some(description.clone());
        }
        if let Some(price) = input.price {
            course.price = price;
        }
        if let Some(level) = &input.level {
            course.level = level.clone();
        }
        if let Some(language) = &input.language {
            course.language = language.clone();
        }
        if let Some(duration) = &input.duration {
            course.duration = duration.clone();
        }
        if let Some(requirements) = &input.requirements {
            course.requirements = requirements.clone();
        }
        if let Some(outcomes) = &input.learning_outcomes {
            course.learning_outcomes = outcomes.clone();
        }
        if let Some(category_id) = input.category_id {
            course.category_id = category_id;
        }
        if let Some(instructor_id) = input.instructor_id {
            course.instructor_id = instructor_id;
        }
        course.updated_at = Utc::now();
        Ok(course.clone())
    }

    async fn delete(&self, id: i64) -> Result<()> {
        let mut courses = self.db.courses.write().await;
        let before = courses.len();
        courses.retain(|c| c.id != id);
        if courses.len() == before {
            return Err(AppError::NotFound(format!("Course {} not found", id)));
        }
        Ok(())
    }
}

#[async_trait]
impl ModuleRepository for TestModuleRepository {
    async fn create(&self, input: &CreateModuleInput) -> Result<CourseModule> {
        let module = CourseModule {
            id: self.db.next_id(),
            title: input.title.clone(),
            position: input.position,
            course_id: input.course_id,
            ..Default::default()
        };
        self.db.modules.write().await.push(module.clone());
        Ok(module)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<CourseModule>> {
        Ok(self.db.modules.read().await.iter().find(|m| m.id == id).cloned())
    }

    async fn list(&self) -> Result<Vec<CourseModule>> {
        let mut modules = self.db.modules.read().await.clone();
        modules.sort_by_key(|m| (m.course_id, m.position, m.id));
        Ok(modules)
    }

    async fn list_by_course(&self, course_id: i64) -> Result<Vec<CourseModule>> {
        let mut modules: Vec<CourseModule> = self
            .db
            .modules
            .read()
            .await
            .iter()
            .filter(|m| m.course_id == course_id)
            .cloned()
            .collect();
        modules.sort_by_key(|m| (m.position, m.id));
        Ok(modules)
    }

    async fn update(&self, id: i64, input: &UpdateModuleInput) -> Result<CourseModule> {
        let mut modules = self.db.modules.write().await;
        let module = modules
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or_else(|| AppError::NotFound(format!("Module {} not found", id)))?;

        if let Some(title) = &input.title {
            module.title = title.clone();
        }
        if let Some(position) = input.position {
            module.position = position;
        }
        if let Some(course_id) = input.course_id {
            module.course_id = course_id;
        }
        module.updated_at = Utc::now();
        Ok(module.clone())
    }

    async fn delete(&self, id: i64) -> Result<()> {
        let mut modules = self.db.modules.write().await;
        let before = modules.len();
        modules.retain(|m| m.id != id);
        if modules.len() == before {
            return Err(AppError::NotFound(format!("Module {} not found", id)));
        }
        Ok(())
    }
}

#[async_trait]
impl ContentRepository for TestContentRepository {
    async fn create(&self, input: &CreateContentInput) -> Result<Content> {
        let content = Content {
            id: self.db.next_id(),
            title: input.title.clone(),
            content_url: input.content_url.clone(),
            content_type: input.content_type,
            duration: input.duration.clone(),
            position: input.position,
            module_id: input.module_id,
            ..Default::default()
        };
        self.db.contents.write().await.push(content.clone());
        Ok(content)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Content>> {
        Ok(self.db.contents.read().await.iter().find(|c| c.id == id).cloned())
    }

    async fn list(&self) -> Result<Vec<Content>> {
        let mut contents = self.db.contents.read().await.clone();
        contents.sort_by_key(|c| (c.module_id, c.position, c.id));
        Ok(contents)
    }

    async fn list_by_module(&self, module_id: i64) -> Result<Vec<Content>> {
        let mut contents: Vec<Content> = self
            .db
            .contents
            .read()
            .await
            .iter()
            .filter(|c| c.module_id == module_id)
            .cloned()
            .collect();
        contents.sort_by_key(|c| (c.position, c.id));
        Ok(contents)
    }

    async fn update(&self, id: i64, input: &UpdateContentInput) -> Result<Content> {
        let mut contents = self.db.contents.write().await;
        let content = contents
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| AppError::NotFound(format!("Content {} not found", id)))?;

        if let Some(title) = &input.title {
            content.title = title.clone();
        }
        if let Some(url) = &input.content_url {
            content.content_url = url.clone();
        }
        if let Some(content_type) = input.content_type {
            content.content_type = content_type;
        }
        if let Some(duration) = &input.duration {
            content.duration = duration.clone();
        }
        if let Some(position) = input.position {
            content.position = position;
        }
        if let Some(module_id) = input.module_id {
            content.module_id = module_id;
        }
        content.updated_at = Utc::now();
        Ok(content.clone())
    }

    async fn delete(&self, id: i64) -> Result<()> {
        let mut contents = self.db.contents.write().await;
        let before = contents.len();
        contents.retain(|c| c.id != id);
        if contents.len() == before {
            return Err(AppError::NotFound(format!("Content {} not found", id)));
        }
        Ok(())
    }
}

#[async_trait]
impl TemplateRepository for TestTemplateRepository {
    async fn create(&self, name: &str) -> Result<Template> {
        let now = Utc::now();
        let template = Template {
            id: self.db.next_id(),
            name: name.to_string(),
            created_at: now,
            updated_at: now,
        };
        self.db.templates.write().await.push(template.clone());
        Ok(template)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Template>> {
        Ok(self
            .db
            .templates
            .read()
            .await
            .iter()
            .find(|t| t.id == id)
            .cloned())
    }

    async fn list(&self) -> Result<Vec<Template>> {
        let mut templates = self.db.templates.read().await.clone();
        templates.reverse();
        Ok(templates)
    }

    async fn update(&self, id: i64, name: &str) -> Result<Template> {
        let mut templates = self.db.templates.write().await;
        let template = templates
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| AppError::NotFound(format!("Template {} not found", id)))?;
        template.name = name.to_string();
        template.updated_at = Utc::now();
        Ok(template.clone())
    }

    async fn delete(&self, id: i64) -> Result<()> {
        let mut templates = self.db.templates.write().await;
        let before = templates.len();
        templates.retain(|t| t.id != id);
        if templates.len() == before {
            return Err(AppError::NotFound(format!("Template {} not found", id)));
        }
        Ok(())
    }
}

#[async_trait]
impl QuizRepository for TestQuizRepository {
    async fn create(&self, input: &CreateQuizInput) -> Result<InsertOutcome<Quiz>> {
        let mut quizzes = self.db.quizzes.write().await;
        if quizzes.iter().any(|q| q.content_id == input.content_id) {
            return Ok(InsertOutcome::AlreadyExists);
        }
        let now = Utc::now();
        let quiz = Quiz {
            id: self.db.next_id(),
            content_id: input.content_id,
            title: input.title.clone(),
            created_at: now,
            updated_at: now,
        };
        quizzes.push(quiz.clone());
        Ok(InsertOutcome::Created(quiz))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Quiz>> {
        Ok(self.db.quizzes.read().await.iter().find(|q| q.id == id).cloned())
    }

    async fn find_by_content(&self, content_id: i64) -> Result<Option<Quiz>> {
        Ok(self
            .db
            .quizzes
            .read()
            .await
            .iter()
            .find(|q| q.content_id == content_id)
            .cloned())
    }

    async fn list(&self) -> Result<Vec<Quiz>> {
        Ok(self.db.quizzes.read().await.clone())
    }

    async fn update_title(&self, id: i64, title: &str) -> Result<Quiz> {
        let mut quizzes = self.db.quizzes.write().await;
        let quiz = quizzes
            .iter_mut()
            .find(|q| q.id == id)
            .ok_or_else(|| AppError::NotFound(format!("Quiz {} not found", id)))?;
        quiz.title = title.to_string();
        quiz.updated_at = Utc::now();
        Ok(quiz.clone())
    }

    async fn delete(&self, id: i64) -> Result<()> {
        let mut quizzes = self.db.quizzes.write().await;
        let before = quizzes.len();
        quizzes.retain(|q| q.id != id);
        if quizzes.len() == before {
            return Err(AppError::NotFound(format!("Quiz {} not found", id)));
        }
        drop(quizzes);

        let mut questions = self.db.questions.write().await;
        let removed: HashSet<i64> = questions
            .iter()
            .filter(|q| q.quiz_id == id)
            .map(|q| q.id)
            .collect();
        questions.retain(|q| q.quiz_id != id);
        self.db
            .answers
            .write()
            .await
            .retain(|a| !removed.contains(&a.question_id));
        Ok(())
    }

    async fn list_questions(&self, quiz_id: i64) -> Result<Vec<QuestionWithAnswers>> {
        Ok(self.db.questions_with_answers(quiz_id).await)
    }

    async fn add_questions(
        &self,
        quiz_id: i64,
        questions: &[QuestionInput],
    ) -> Result<Vec<QuestionWithAnswers>> {
        let mut created = Vec::with_capacity(questions.len());
        for input in questions {
            let question = Question {
                id: self.db.next_id(),
                quiz_id,
                question_text: input.question_text.clone(),
                question_type: input.question_type,
                created_at: Utc::now(),
            };
            let answers: Vec<QuizAnswer> = input
                .answers
                .iter()
                .map(|a| QuizAnswer {
                    id: self.db.next_id(),
                    question_id: question.id,
                    answer_text: a.answer_text.clone(),
                    is_correct: a.is_correct,
                })
                .collect();
            self.db.questions.write().await.push(question.clone());
            self.db.answers.write().await.extend(answers.iter().cloned());
            created.push(QuestionWithAnswers { question, answers });
        }
        Ok(created)
    }

    async fn apply_question_changes(
        &self,
        quiz_id: i64,
        changes: &[QuestionUpdateInput],
    ) -> Result<()> {
        let mut questions = self.db.questions.write().await;
        let mut answers = self.db.answers.write().await;

        for change in changes {
            let question_id = match change.id {
                Some(question_id) => {
                    if let Some(question) = questions
                        .iter_mut()
                        .find(|q| q.id == question_id && q.quiz_id == quiz_id)
                    {
                        if let Some(text) = &change.question_text {
                            question.question_text = text.clone();
                        }
                        if let Some(question_type) = change.question_type {
                            question.question_type = question_type;
                        }
                    }
                    question_id
                }
                None => {
                    let (Some(question_text), Some(question_type)) =
                        (&change.question_text, change.question_type)
                    else {
                        return Err(AppError::BadRequest(
                            "New questions require question_text and type".to_string(),
                        ));
                    };
                    let question = Question {
                        id: self.db.next_id(),
                        quiz_id,
                        question_text: question_text.clone(),
                        question_type,
                        created_at: Utc::now(),
                    };
                    let id = question.id;
                    questions.push(question);
                    id
                }
            };

            answers.retain(|a| {
                !(a.question_id == question_id && change.deleted_answer_ids.contains(&a.id))
            });

            for answer in &change.answers {
                match answer.id {
                    Some(answer_id) => {
                        if let Some(existing) = answers
                            .iter_mut()
                            .find(|a| a.id == answer_id && a.question_id == question_id)
                        {
                            if let Some(text) = &answer.answer_text {
                                existing.answer_text = text.clone();
                            }
                            if let Some(is_correct) = answer.is_correct {
                                existing.is_correct = is_correct;
                            }
                        }
                    }
                    None => {
                        let answer_text = answer.answer_text.clone().ok_or_else(|| {
                            AppError::BadRequest("New answers require answer_text".to_string())
                        })?;
                        answers.push(QuizAnswer {
                            id: self.db.next_id(),
                            question_id,
                            answer_text,
                            is_correct: answer.is_correct.unwrap_or(false),
                        });
                    }
                }
            }
        }
        Ok(())
    }
}

#[async_trait]
impl AttemptRepository for TestAttemptRepository {
    async fn create(&self, user_id: i64, quiz_id: i64) -> Result<QuizAttempt> {
        let attempt = QuizAttempt {
            id: self.db.next_id(),
            user_id,
            quiz_id,
            status: AttemptStatus::InProgress,
            score: None,
            started_at: Utc::now(),
            completed_at: None,
        };
        self.db.attempts.write().await.push(attempt.clone());
        Ok(attempt)
    }

    async fn record_answers(&self, attempt_id: i64, answers: &[NewUserQuizAnswer]) -> Result<()> {
        let mut rows = self.db.user_answers.write().await;
        for answer in answers {
            rows.push(UserQuizAnswer {
                id: self.db.next_id(),
                attempt_id,
                question_id: answer.question_id,
                answer_id: answer.answer_id,
                is_correct: answer.is_correct,
                answered_at: answer.answered_at,
            });
        }
        Ok(())
    }

    async fn complete(&self, attempt_id: i64, score: f64) -> Result<QuizAttempt> {
        let mut attempts = self.db.attempts.write().await;
        let attempt = attempts
            .iter_mut()
            .find(|a| a.id == attempt_id)
            .ok_or_else(|| AppError::NotFound(format!("Attempt {} not found", attempt_id)))?;
        attempt.status = AttemptStatus::Completed;
        attempt.score = Some(score);
        attempt.completed_at = Some(Utc::now());
        Ok(attempt.clone())
    }

    async fn list_by_user_and_quiz(
        &self,
        user_id: i64,
        quiz_id: i64,
    ) -> Result<Vec<QuizAttempt>> {
        Ok(self
            .db
            .attempts
            .read()
            .await
            .iter()
            .rev()
            .filter(|a| a.user_id == user_id && a.quiz_id == quiz_id)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl EnrollmentRepository for TestEnrollmentRepository {
    async fn create(&self, input: &CreateEnrollmentInput) -> Result<InsertOutcome<Enrollment>> {
        let mut enrollments = self.db.enrollments.write().await;
        if enrollments
            .iter()
            .any(|e| e.user_id == input.user_id && e.course_id == input.course_id)
        {
            return Ok(InsertOutcome::AlreadyExists);
        }
        let enrollment = Enrollment {
            id: self.db.next_id(),
            user_id: input.user_id,
            course_id: input.course_id,
            progress_percentage: input.progress_percentage,
            completed_at: input.completed_at,
            access_expires_at: input.access_expires_at,
            created_at: Utc::now(),
        };
        enrollments.push(enrollment.clone());
        Ok(InsertOutcome::Created(enrollment))
    }

    async fn find(&self, user_id: i64, course_id: i64) -> Result<Option<Enrollment>> {
        Ok(self
            .db
            .enrollments
            .read()
            .await
            .iter()
            .find(|e| e.user_id == user_id && e.course_id == course_id)
            .cloned())
    }

    async fn list(&self) -> Result<Vec<Enrollment>> {
        Ok(self.db.enrollments.read().await.clone())
    }

    async fn list_by_user(&self, user_id: i64) -> Result<Vec<Enrollment>> {
        Ok(self
            .db
            .enrollments
            .read()
            .await
            .iter()
            .filter(|e| e.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn complete_course(
        &self,
        user_id: i64,
        course_id: i64,
        certificate_url: &str,
    ) -> Result<InsertOutcome<(Enrollment, Certificate)>> {
        let mut enrollments = self.db.enrollments.write().await;
        let mut certificates = self.db.certificates.write().await;

        if certificates
            .iter()
            .any(|c| c.user_id == user_id && c.course_id == course_id)
        {
            return Ok(InsertOutcome::AlreadyExists);
        }

        let enrollment = enrollments
            .iter_mut()
            .find(|e| e.user_id == user_id && e.course_id == course_id)
            .ok_or_else(|| {
                AppError::NotFound(format!("Enrollment for course {} not found", course_id))
            })?;
        enrollment.progress_percentage = 100;
        enrollment.completed_at = Some(Utc::now());

        let certificate = Certificate {
            id: self.db.next_id(),
            user_id,
            course_id,
            certificate_url: certificate_url.to_string(),
            issued_at: Utc::now(),
        };
        certificates.push(certificate.clone());
        Ok(InsertOutcome::Created((enrollment.clone(), certificate)))
    }

    async fn list_certificates(&self, user_id: i64) -> Result<Vec<Certificate>> {
        Ok(self
            .db
            .certificates
            .read()
            .await
            .iter()
            .rev()
            .filter(|c| c.user_id == user_id)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl ProgressRepository for TestProgressRepository {
    async fn create_content_progress(
        &self,
        user_id: i64,
        content_id: i64,
    ) -> Result<InsertOutcome<UserContentProgress>> {
        let mut rows = self.db.content_progress.write().await;
        if rows
            .iter()
            .any(|p| p.user_id == user_id && p.content_id == content_id)
        {
            return Ok(InsertOutcome::AlreadyExists);
        }
        let progress = UserContentProgress {
            id: self.db.next_id(),
            user_id,
            content_id,
            is_completed: true,
            updated_at: Utc::now(),
        };
        rows.push(progress.clone());
        Ok(InsertOutcome::Created(progress))
    }

    async fn create_module_progress(
        &self,
        user_id: i64,
        module_id: i64,
    ) -> Result<InsertOutcome<UserModuleProgress>> {
        let mut rows = self.db.module_progress.write().await;
        if rows
            .iter()
            .any(|p| p.user_id == user_id && p.module_id == module_id)
        {
            return Ok(InsertOutcome::AlreadyExists);
        }
        let progress = UserModuleProgress {
            id: self.db.next_id(),
            user_id,
            module_id,
            is_completed: true,
            progress_percentage: 100,
            updated_at: Utc::now(),
        };
        rows.push(progress.clone());
        Ok(InsertOutcome::Created(progress))
    }

    async fn list_content_progress_in_module(
        &self,
        user_id: i64,
        module_id: i64,
    ) -> Result<Vec<UserContentProgress>> {
        let content_ids: HashSet<i64> = self
            .db
            .contents
            .read()
            .await
            .iter()
            .filter(|c| c.module_id == module_id)
            .map(|c| c.id)
            .collect();
        Ok(self
            .db
            .content_progress
            .read()
            .await
            .iter()
            .filter(|p| p.user_id == user_id && content_ids.contains(&p.content_id))
            .cloned()
            .collect())
    }

    async fn list_module_progress_in_course(
        &self,
        user_id: i64,
        course_id: i64,
    ) -> Result<Vec<UserModuleProgress>> {
        let module_ids: HashSet<i64> = self
            .db
            .modules
            .read()
            .await
            .iter()
            .filter(|m| m.course_id == course_id)
            .map(|m| m.id)
            .collect();
        Ok(self
            .db
            .module_progress
            .read()
            .await
            .iter()
            .filter(|p| p.user_id == user_id && module_ids.contains(&p.module_id))
            .cloned()
            .collect())
    }
}

#[async_trait]
impl OrderRepository for TestOrderRepository {
    async fn find_payment_method(&self, id: &str) -> Result<Option<PaymentMethod>> {
        Ok(self
            .db
            .payment_methods
            .read()
            .await
            .iter()
            .find(|m| m.id == id)
            .cloned())
    }

    async fn list_payment_methods(&self) -> Result<Vec<PaymentMethod>> {
        let mut methods = self.db.payment_methods.read().await.clone();
        methods.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(methods)
    }

    async fn create(&self, input: &NewOrder) -> Result<OrderWithPayment> {
        let now = Utc::now();
        let order = Order {
            id: self.db.next_id(),
            user_id: input.user_id,
            course_id: input.course_id,
            amount: input.amount,
            status: input.status,
            created_at: now,
        };
        let payment = input.payment.as_ref().map(|p| Payment {
            id: self.db.next_id(),
            order_id: order.id,
            payment_method_id: p.payment_method_id.clone(),
            provider_transaction_id: p.provider_transaction_id.clone(),
            amount: input.amount,
            created_at: now,
        });

        self.db.orders.write().await.push(order.clone());
        if let Some(payment) = &payment {
            self.db.payments.write().await.push(payment.clone());
        }
        Ok(OrderWithPayment { order, payment })
    }

    async fn list(&self) -> Result<Vec<OrderWithPayment>> {
        let orders: Vec<Order> = self.db.orders.read().await.iter().rev().cloned().collect();
        let payments = self.db.payments.read().await;
        Ok(orders
            .into_iter()
            .map(|order| OrderWithPayment {
                payment: payments.iter().find(|p| p.order_id == order.id).cloned(),
                order,
            })
            .collect())
    }

    async fn list_by_user(&self, user_id: i64) -> Result<Vec<OrderWithPayment>> {
        let orders: Vec<Order> = self
            .db
            .orders
            .read()
            .await
            .iter()
            .rev()
            .filter(|o| o.user_id == user_id)
            .cloned()
            .collect();
        let payments = self.db.payments.read().await;
        Ok(orders
            .into_iter()
            .map(|order| OrderWithPayment {
                payment: payments.iter().find(|p| p.order_id == order.id).cloned(),
                order,
            })
            .collect())
    }
}

#[async_trait]
impl SavedCourseRepository for TestSavedCourseRepository {
    async fn add(
        &self,
        kind: SavedListKind,
        user_id: i64,
        course_id: i64,
    ) -> Result<InsertOutcome<SavedCourse>> {
        let mut rows = self.db.saved_table(kind).write().await;
        if rows
            .iter()
            .any(|s| s.user_id == user_id && s.course_id == course_id)
        {
            return Ok(InsertOutcome::AlreadyExists);
        }
        let saved = SavedCourse {
            id: self.db.next_id(),
            user_id,
            course_id,
            created_at: Utc::now(),
        };
        rows.push(saved.clone());
        Ok(InsertOutcome::Created(saved))
    }

    async fn list_courses(&self, kind: SavedListKind, user_id: i64) -> Result<Vec<Course>> {
        let course_ids: Vec<i64> = self
            .db
            .saved_table(kind)
            .read()
            .await
            .iter()
            .rev()
            .filter(|s| s.user_id == user_id)
            .map(|s| s.course_id)
            .collect();
        let courses = self.db.courses.read().await;
        Ok(course_ids
            .iter()
            .filter_map(|id| courses.iter().find(|c| c.id == *id).cloned())
            .collect())
    }

    async fn remove(&self, kind: SavedListKind, user_id: i64, course_id: i64) -> Result<()> {
        let mut rows = self.db.saved_table(kind).write().await;
        let before = rows.len();
        rows.retain(|s| !(s.user_id == user_id && s.course_id == course_id));
        if rows.len() == before {
            return Err(AppError::NotFound(format!(
                "Course {} is not in your {}",
                course_id,
                kind.label()
            )));
        }
        Ok(())
    }
}
