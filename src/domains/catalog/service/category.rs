//! Category reads

use crate::domain::Category;
use crate::error::Result;
use crate::repository::CategoryRepository;
use std::sync::Arc;

pub struct CategoryService<K: CategoryRepository> {
    repo: Arc<K>,
}

impl<K: CategoryRepository> CategoryService<K> {
    pub fn new(repo: Arc<K>) -> Self {
        Self { repo }
    }

    pub async fn list(&self) -> Result<Vec<Category>> {
        self.repo.list().await
    }
}
