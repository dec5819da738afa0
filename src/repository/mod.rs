//! Data access layer (Repository pattern)

pub mod attempt;
pub mod category;
pub mod content;
pub mod course;
pub mod course_module;
pub mod enrollment;
pub mod order;
pub mod progress;
pub mod quiz;
pub mod saved_course;
pub mod template;
pub mod user;

pub use attempt::AttemptRepository;
pub use category::CategoryRepository;
pub use content::ContentRepository;
pub use course::CourseRepository;
pub use course_module::ModuleRepository;
pub use enrollment::EnrollmentRepository;
pub use order::OrderRepository;
pub use progress::ProgressRepository;
pub use quiz::QuizRepository;
pub use saved_course::SavedCourseRepository;
pub use template::TemplateRepository;
pub use user::UserRepository;

/// Result of an insert guarded by a unique key.
///
/// `AlreadyExists` is returned instead of an error when the storage layer
/// rejects the row as a duplicate; other failures stay in `Err`.
#[derive(Debug, Clone, PartialEq)]
pub enum InsertOutcome<T> {
    Created(T),
    AlreadyExists,
}

impl<T> InsertOutcome<T> {
    /// Converts `AlreadyExists` into `AppError::Conflict` with the given message
    pub fn or_conflict(self, message: impl Into<String>) -> crate::error::Result<T> {
        match self {
            InsertOutcome::Created(value) => Ok(value),
            InsertOutcome::AlreadyExists => Err(crate::error::AppError::Conflict(message.into())),
        }
    }
}

/// Duplicate key on insert (`ER_DUP_ENTRY` and friends, SQLSTATE 23000)
pub(crate) fn is_unique_violation(error: &sqlx::Error) -> bool {
    match error {
        sqlx::Error::Database(db_err) => {
            db_err.kind() == sqlx::error::ErrorKind::UniqueViolation
        }
        _ => false,
    }
}
