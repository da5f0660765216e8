//! UpdateCategoryHandler - editors rename or reorder a section.

use std::sync::Arc;

use tracing::info;

use crate::application::authorization::ensure_can_edit;
use crate::domain::content::{Category, ContentError};
use crate::domain::foundation::{Actor, CategoryId};
use crate::ports::CategoryRepository;

#[derive(Debug, Clone)]
pub struct UpdateCategoryCommand {
    pub actor: Actor,
    pub category_id: CategoryId,
    pub name: String,
    pub slug: Option<String>,
    pub sort_order: i32,
}

pub type UpdateCategoryResult = Category;

pub struct UpdateCategoryHandler {
    categories: Arc<dyn CategoryRepository>,
}

impl UpdateCategoryHandler {
    pub fn new(categories: Arc<dyn CategoryRepository>) -> Self {
        Self { categories }
    }

    pub async fn handle(
        &self,
        cmd: UpdateCategoryCommand,
    ) -> Result<UpdateCategoryResult, ContentError> {
        ensure_can_edit(&cmd.actor, "update categories")?;

        let existing = self
            .categories
            .find_by_id(&cmd.category_id)
            .await?
            .ok_or_else(|| ContentError::not_found("category", cmd.category_id))?;

        let mut category = Category::new(
            &cmd.name,
            cmd.slug.as_deref(),
            cmd.sort_order,
            existing.created_at,
        )?;
        category.id = existing.id;
        self.categories.update(&category).await?;

        info!(category_id = %category.id, slug = %category.slug, "Category updated");
        Ok(category)
    }
}
