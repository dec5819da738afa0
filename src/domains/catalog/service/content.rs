//! Content business logic

use crate::domain::{Content, ContentWithQuiz, CreateContentInput, UpdateContentInput};
use crate::error::{AppError, Result};
use crate::repository::{ContentRepository, ModuleRepository, QuizRepository};
use std::sync::Arc;
use validator::Validate;

/// Pairs each content with its quiz, if any
pub(crate) async fn with_quizzes<Q: QuizRepository>(
    quiz_repo: &Q,
    contents: Vec<Content>,
) -> Result<Vec<ContentWithQuiz>> {
    let mut result = Vec::with_capacity(contents.len());
    for content in contents {
        let quiz = quiz_repo.find_by_content(content.id).await?;
        result.push(ContentWithQuiz { content, quiz });
    }
    Ok(result)
}

pub struct ContentService<T, M, Q>
where
    T: ContentRepository,
    M: ModuleRepository,
    Q: QuizRepository,
{
    repo: Arc<T>,
    module_repo: Arc<M>,
    quiz_repo: Arc<Q>,
}

impl<T, M, Q> ContentService<T, M, Q>
where
    T: ContentRepository,
    M: ModuleRepository,
    Q: QuizRepository,
{
    pub fn new(repo: Arc<T>, module_repo: Arc<M>, quiz_repo: Arc<Q>) -> Self {
        Self {
            repo,
            module_repo,
            quiz_repo,
        }
    }

    pub async fn create(&self, input: CreateContentInput) -> Result<Content> {
        input.validate()?;
        self.ensure_module(input.module_id).await?;

        self.repo.create(&input).await
    }

    pub async fn list(&self) -> Result<Vec<Content>> {
        self.repo.list().await
    }

    pub async fn get(&self, id: i64) -> Result<ContentWithQuiz> {
        let content = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Content not found".to_string()))?;
        let quiz = self.quiz_repo.find_by_content(id).await?;

        Ok(ContentWithQuiz { content, quiz })
    }

    pub async fn list_by_module(&self, module_id: i64) -> Result<Vec<ContentWithQuiz>> {
        self.ensure_module(module_id).await?;
        let contents = self.repo.list_by_module(module_id).await?;
        with_quizzes(self.quiz_repo.as_ref(), contents).await
    }

    pub async fn update(&self, id: i64, input: UpdateContentInput) -> Result<Content> {
        if input.is_empty() {
            return Err(AppError::BadRequest(
                "No fields provided for update".to_string(),
            ));
        }
        input.validate()?;
        if let Some(module_id) = input.module_id {
            self.ensure_module(module_id).await?;
        }

        self.repo.update(id, &input).await
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        self.repo.delete(id).await
    }

    async fn ensure_module(&self, module_id: i64) -> Result<()> {
        match self.module_repo.find_by_id(module_id).await? {
            Some(_) => Ok(()),
            None => Err(AppError::NotFound("Module not found".to_string())),
        }
    }
}
