//! ListCategoriesHandler - public navigation sections.

use std::sync::Arc;

use crate::domain::content::{Category, ContentError};
use crate::ports::CategoryRepository;

#[derive(Debug, Clone, Default)]
pub struct ListCategoriesQuery;

pub type ListCategoriesResult = Vec<Category>;

pub struct ListCategoriesHandler {
    categories: Arc<dyn CategoryRepository>,
}

impl ListCategoriesHandler {
    pub fn new(categories: Arc<dyn CategoryRepository>) -> Self {
        Self { categories }
    }

    pub async fn handle(
        &self,
        _query: ListCategoriesQuery,
    ) -> Result<ListCategoriesResult, ContentError> {
        Ok(self.categories.list().await?)
    }
}
