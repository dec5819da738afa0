//! Course repository

use crate::domain::{Course, CourseOverview, CreateCourseInput, UpdateCourseInput, UserSummary};
use crate::error::{AppError, Result};
use async_trait::async_trait;
use sqlx::{FromRow, MySqlPool};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CourseRepository: Send + Sync {
    async fn create(&self, input: &CreateCourseInput) -> Result<Course>;
    async fn find_by_id(&self, id: i64) -> Result<Option<Course>>;
    async fn find_overview(&self, id: i64) -> Result<Option<CourseOverview>>;
    async fn list_overviews(&self) -> Result<Vec<CourseOverview>>;
    /// Courses the user holds an enrollment for
    async fn list_enrolled_overviews(&self, user_id: i64) -> Result<Vec<CourseOverview>>;
    async fn update(&self, id: i64, input: &UpdateCourseInput) -> Result<Course>;
    async fn delete(&self, id: i64) -> Result<()>;
}

pub struct CourseRepositoryImpl {
    pool: MySqlPool,
}

impl CourseRepositoryImpl {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct CourseOverviewRow {
    #[sqlx(flatten)]
    course: Course,
    category_name: String,
    instructor_name: String,
    instructor_email: String,
    total_students: i64,
}

impl From<CourseOverviewRow> for CourseOverview {
    fn from(row: CourseOverviewRow) -> Self {
        CourseOverview {
            instructor: UserSummary {
                id: row.course.instructor_id,
                name: row.instructor_name,
                email: row.instructor_email,
            },
            category_name: row.category_name,
            total_students: row.total_students,
            course: row.course,
        }
    }
}

const OVERVIEW_SELECT: &str = r#"
    SELECT c.id, c.title, c.description, c.price, c.level, c.language, c.duration,
           c.requirements, c.learning_outcomes, c.category_id, c.instructor_id,
           c.created_at, c.updated_at,
           cat.name AS category_name,
           u.name AS instructor_name,
           u.email AS instructor_email,
           (SELECT COUNT(*) FROM enrollments e WHERE e.course_id = c.id) AS total_students
    FROM courses c
    JOIN categories cat ON cat.id = c.category_id
    JOIN users u ON u.id = c.instructor_id
"#;

#[async_trait]
impl CourseRepository for CourseRepositoryImpl {
    async fn create(&self, input: &CreateCourseInput) -> Result<Course> {
        let result = sqlx::query(
            r#"
            INSERT INTO courses (title, description, price, level, language, duration,
                                 requirements, learning_outcomes, category_id, instructor_id,
                                 created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, NOW(), NOW())
            "#,
        )
        .bind(&input.title)
        .bind(&input.description)
        .bind(input.price)
        .bind(&input.level)
        .bind(&input.language)
        .bind(&input.duration)
        .bind(&input.requirements)
        .bind(&input.learning_outcomes)
        .bind(input.category_id)
        .bind(input.instructor_id)
        .execute(&self.pool)
        .await?;

        self.find_by_id(result.last_insert_id() as i64)
            .await?
            .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Failed to create course")))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Course>> {
        let course = sqlx::query_as::<_, Course>(
            r#"
            SELECT id, title, description, price, level, language, duration,
                   requirements, learning_outcomes, category_id, instructor_id,
                   created_at, updated_at
            FROM courses
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(course)
    }

    async fn find_overview(&self, id: i64) -> Result<Option<CourseOverview>> {
        let sql = format!("{} WHERE c.id = ?", OVERVIEW_SELECT);
        let row = sqlx::query_as::<_, CourseOverviewRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(CourseOverview::from))
    }

    async fn list_overviews(&self) -> Result<Vec<CourseOverview>> {
        let sql = format!("{} ORDER BY c.id", OVERVIEW_SELECT);
        let rows = sqlx::query_as::<_, CourseOverviewRow>(&sql)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(CourseOverview::from).collect())
    }

    async fn list_enrolled_overviews(&self, user_id: i64) -> Result<Vec<CourseOverview>> {
        let sql = format!(
            "{} WHERE c.id IN (SELECT course_id FROM enrollments WHERE user_id = ?) ORDER BY c.id",
            OVERVIEW_SELECT
        );
        let rows = sqlx::query_as::<_, CourseOverviewRow>(&sql)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(CourseOverview::from).collect())
    }

    async fn update(&self, id: i64, input: &UpdateCourseInput) -> Result<Course> {
        let existing = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Course {} not found", id)))?;

        let description = input.description.as_ref().or(existing.description.as_ref());

        sqlx::query(
            r#"
            UPDATE courses
            SET title = ?, description = ?, price = ?, level = ?, language = ?, duration = ?,
                requirements = ?, learning_outcomes = ?, category_id = ?, instructor_id = ?,
                updated_at = NOW()
            WHERE id = ?
            "#,
        )
        .bind(input.title.as_ref().unwrap_or(&existing.title))
        .bind(description)
        .bind(input.price.unwrap_or(existing.price))
        .bind(input.level.as_ref().unwrap_or(&existing.level))
        .bind(input.language.as_ref().unwrap_or(&existing.language))
        .bind(input.duration.as_ref().unwrap_or(&existing.duration))
        .bind(input.requirements.as_ref().unwrap_or(&existing.requirements))
        .bind(
            input
                .learning_outcomes
                .as_ref()
                .unwrap_or(&existing.learning_outcomes),
        )
        .bind(input.category_id.unwrap_or(existing.category_id))
        .bind(input.instructor_id.unwrap_or(existing.instructor_id))
        .bind(id)
        .execute(&self.pool)
        .await?;

        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Failed to update course")))
    }

    async fn delete(&self, id: i64) -> Result<()> {
        let result = sqlx::query("DELETE FROM courses WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Course {} not found", id)));
        }

        Ok(())
    }
}
