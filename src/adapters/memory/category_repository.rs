//! In-memory category store.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::content::Category;
use crate::domain::foundation::{CategoryId, DomainError, ErrorCode};
use crate::ports::CategoryRepository;

#[derive(Debug, Clone, Default)]
pub struct InMemoryCategoryRepository {
    categories: Arc<RwLock<HashMap<CategoryId, Category>>>,
}

impl InMemoryCategoryRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn slug_taken(slug: &str) -> DomainError {
    DomainError::new(
        ErrorCode::AlreadyExists,
        format!("Category slug '{}' is taken", slug),
    )
}

#[async_trait]
impl CategoryRepository for InMemoryCategoryRepository {
    async fn list(&self) -> Result<Vec<Category>, DomainError> {
        let mut categories: Vec<Category> =
            self.categories.read().await.values().cloned().collect();
        categories.sort_by(|a, b| {
            a.sort_order
                .cmp(&b.sort_order)
                .then_with(|| a.name.cmp(&b.name))
        });
        Ok(categories)
    }

    async fn find_by_id(&self, id: &CategoryId) -> Result<Option<Category>, DomainError> {
        Ok(self.categories.read().await.get(id).cloned())
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Category>, DomainError> {
        Ok(self
            .categories
            .read()
            .await
            .values()
            .find(|c| c.slug == slug)
            .cloned())
    }

    async fn create(&self, category: &Category) -> Result<(), DomainError> {
        let mut categories = self.categories.write().await;
        if categories.values().any(|c| c.slug == category.slug) {
            return Err(slug_taken(&category.slug));
        }
        categories.insert(category.id, category.clone());
        Ok(())
    }

    async fn update(&self, category: &Category) -> Result<(), DomainError> {
        let mut categories = self.categories.write().await;
        if categories
            .values()
            .any(|c| c.slug == category.slug && c.id != category.id)
        {
            return Err(slug_taken(&category.slug));
        }
        match categories.get_mut(&category.id) {
            Some(stored) => {
                *stored = category.clone();
                Ok(())
            }
            None => Err(DomainError::new(
                ErrorCode::CategoryNotFound,
                format!("Category not found: {}", category.id),
            )),
        }
    }

    async fn delete(&self, id: &CategoryId) -> Result<bool, DomainError> {
        Ok(self.categories.write().await.remove(id).is_some())
    }
}
