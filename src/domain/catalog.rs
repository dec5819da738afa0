//! Catalog domain models: categories, courses, modules, contents and templates

use super::quiz::Quiz;
use super::user::UserSummary;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

lazy_static::lazy_static! {
    /// `mm:ss` or `hh:mm`
    pub static ref DURATION_REGEX: regex::Regex = regex::Regex::new(r"^\d{1,2}:[0-5]\d$").unwrap();
}

fn validate_duration(value: &str) -> Result<(), validator::ValidationError> {
    if DURATION_REGEX.is_match(value) {
        Ok(())
    } else {
        Err(validator::ValidationError::new("invalid_duration")
            .with_message("Duration must be in mm:ss or hh:mm format".into()))
    }
}

/// Course category (static reference data)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Category {
    pub id: i64,
    pub name: String,
}

/// Default categories inserted by `lms-core seed`
pub const DEFAULT_CATEGORIES: [&str; 9] = [
    "Computer Science",
    "Data Science",
    "Business",
    "Health & Medicine",
    "Personal Development",
    "Information Technology",
    "Language Learning",
    "Arts & Humanities",
    "Physical Science & Engineering",
];

// ============================================================
// Courses
// ============================================================

/// Course entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Course {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    /// Smallest currency unit
    pub price: i64,
    pub level: String,
    pub language: String,
    pub duration: String,
    pub requirements: String,
    pub learning_outcomes: String,
    pub category_id: i64,
    pub instructor_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Default for Course {
    fn default() -> Self {
        let now = Utc::now();
        Self {
            id: 0,
            title: String::new(),
            description: None,
            price: 0,
            level: String::new(),
            language: String::new(),
            duration: String::new(),
            requirements: String::new(),
            learning_outcomes: String::new(),
            category_id: 0,
            instructor_id: 0,
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateCourseInput {
    #[validate(length(min = 1, max = 255, message = "Title is required"))]
    pub title: String,
    pub description: Option<String>,
    #[validate(range(min = 0, message = "Price must be a non-negative integer"))]
    pub price: i64,
    #[validate(length(min = 1, message = "Level is required"))]
    pub level: String,
    #[validate(length(min = 1, message = "Language is required"))]
    pub language: String,
    #[validate(length(min = 1, message = "Duration is required"))]
    pub duration: String,
    #[validate(length(min = 1, message = "Requirements are required"))]
    pub requirements: String,
    #[validate(length(min = 1, message = "Learning outcomes are required"))]
    pub learning_outcomes: String,
    #[validate(range(min = 1, message = "Category ID must be a positive integer"))]
    pub category_id: i64,
    #[validate(range(min = 1, message = "Instructor ID must be a positive integer"))]
    pub instructor_id: i64,
}

/// Partial course update; only present fields are validated and written
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateCourseInput {
    #[validate(length(min = 1, max = 255))]
    pub title: Option<String>,
    pub description: Option<String>,
    #[validate(range(min = 0))]
    pub price: Option<i64>,
    #[validate(length(min = 1))]
    pub level: Option<String>,
    #[validate(length(min = 1))]
    pub language: Option<String>,
    #[validate(length(min = 1))]
    pub duration: Option<String>,
    #[validate(length(min = 1))]
    pub requirements: Option<String>,
    #[validate(length(min = 1))]
    pub learning_outcomes: Option<String>,
    #[validate(range(min = 1))]
    pub category_id: Option<i64>,
    #[validate(range(min = 1))]
    pub instructor_id: Option<i64>,
}

impl UpdateCourseInput {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.price.is_none()
            && self.level.is_none()
            && self.language.is_none()
            && self.duration.is_none()
            && self.requirements.is_none()
            && self.learning_outcomes.is_none()
            && self.category_id.is_none()
            && self.instructor_id.is_none()
    }
}

/// Course listing entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourseOverview {
    #[serde(flatten)]
    pub course: Course,
    pub category_name: String,
    pub instructor: UserSummary,
    pub total_students: i64,
}

/// Course with its modules ordered by position
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourseDetail {
    #[serde(flatten)]
    pub overview: CourseOverview,
    pub modules: Vec<CourseModule>,
}

/// Course with its full module and content tree
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourseOutline {
    #[serde(flatten)]
    pub overview: CourseOverview,
    pub modules: Vec<ModuleWithContents>,
}

// ============================================================
// Modules
// ============================================================

/// A module inside a course, ordered by `position`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct CourseModule {
    pub id: i64,
    pub title: String,
    pub position: i32,
    pub course_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Default for CourseModule {
    fn default() -> Self {
        let now = Utc::now();
        Self {
            id: 0,
            title: String::new(),
            position: 0,
            course_id: 0,
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateModuleInput {
    #[validate(length(min = 1, max = 255, message = "Title is required"))]
    pub title: String,
    #[validate(range(min = 0, message = "Position must be a non-negative integer"))]
    pub position: i32,
    #[validate(range(min = 1, message = "Course ID must be a positive integer"))]
    pub course_id: i64,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateModuleInput {
    #[validate(length(min = 1, max = 255))]
    pub title: Option<String>,
    #[validate(range(min = 0))]
    pub position: Option<i32>,
    #[validate(range(min = 1))]
    pub course_id: Option<i64>,
}

impl UpdateModuleInput {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.position.is_none() && self.course_id.is_none()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModuleWithContents {
    #[serde(flatten)]
    pub module: CourseModule,
    pub contents: Vec<ContentWithQuiz>,
}

// ============================================================
// Contents
// ============================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ContentType {
    Video,
    Article,
    Quiz,
}

impl std::str::FromStr for ContentType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "VIDEO" => Ok(ContentType::Video),
            "ARTICLE" => Ok(ContentType::Article),
            "QUIZ" => Ok(ContentType::Quiz),
            _ => Err(format!("Unknown content type: {}", s)),
        }
    }
}

impl std::fmt::Display for ContentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ContentType::Video => write!(f, "VIDEO"),
            ContentType::Article => write!(f, "ARTICLE"),
            ContentType::Quiz => write!(f, "QUIZ"),
        }
    }
}

crate::impl_mysql_string_enum!(ContentType);

/// A piece of learning material inside a module
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Content {
    pub id: i64,
    pub title: String,
    pub content_url: String,
    pub content_type: ContentType,
    pub duration: String,
    pub position: i32,
    pub module_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Default for Content {
    fn default() -> Self {
        let now = Utc::now();
        Self {
            id: 0,
            title: String::new(),
            content_url: String::new(),
            content_type: ContentType::Video,
            duration: "00:00".to_string(),
            position: 1,
            module_id: 0,
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateContentInput {
    #[validate(length(min = 1, max = 255, message = "Title is required"))]
    pub title: String,
    #[validate(url(message = "Must be a valid URL"))]
    pub content_url: String,
    pub content_type: ContentType,
    #[validate(custom(function = "validate_duration"))]
    pub duration: String,
    #[validate(range(min = 1))]
    pub position: i32,
    #[validate(range(min = 1))]
    pub module_id: i64,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateContentInput {
    #[validate(length(min = 1, max = 255))]
    pub title: Option<String>,
    #[validate(url(message = "Must be a valid URL"))]
    pub content_url: Option<String>,
    pub content_type: Option<ContentType>,
    #[validate(custom(function = "validate_duration"))]
    pub duration: Option<String>,
    #[validate(range(min = 1))]
    pub position: Option<i32>,
    #[validate(range(min = 1))]
    pub module_id: Option<i64>,
}

impl UpdateContentInput {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.content_url.is_none()
            && self.content_type.is_none()
            && self.duration.is_none()
            && self.position.is_none()
            && self.module_id.is_none()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentWithQuiz {
    #[serde(flatten)]
    pub content: Content,
    pub quiz: Option<Quiz>,
}

// ============================================================
// Templates
// ============================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Template {
    pub id: i64,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct TemplateInput {
    #[validate(length(max = 255))]
    pub name: String,
}

impl TemplateInput {
    /// Trimmed name, or `None` when blank
    pub fn normalized_name(&self) -> Option<String> {
        let name = self.name.trim();
        if name.is_empty() {
            None
        } else {
            Some(name.to_string())
        }
    }
}
