//! Template business logic

use crate::domain::{Template, TemplateInput};
use crate::error::{AppError, Result};
use crate::repository::TemplateRepository;
use std::sync::Arc;
use validator::Validate;

pub struct TemplateService<R: TemplateRepository> {
    repo: Arc<R>,
}

impl<R: TemplateRepository> TemplateService<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn create(&self, input: TemplateInput) -> Result<Template> {
        let name = Self::name_of(&input)?;
        self.repo.create(&name).await
    }

    pub async fn list(&self) -> Result<Vec<Template>> {
        self.repo.list().await
    }

    pub async fn get(&self, id: i64) -> Result<Template> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Template not found".to_string()))
    }

    pub async fn update(&self, id: i64, input: TemplateInput) -> Result<Template> {
        let name = Self::name_of(&input)?;
        self.repo.update(id, &name).await
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        self.repo.delete(id).await
    }

    fn name_of(input: &TemplateInput) -> Result<String> {
        input.validate()?;
        input
            .normalized_name()
            .ok_or_else(|| AppError::BadRequest("Invalid template name".to_string()))
    }
}
