//! CreateCategoryHandler - editors add a section.

use std::sync::Arc;

use tracing::info;

use crate::application::authorization::ensure_can_edit;
use crate::domain::content::{Category, ContentError};
use crate::domain::foundation::{Actor, Clock};
use crate::ports::CategoryRepository;

#[derive(Debug, Clone)]
pub struct CreateCategoryCommand {
    pub actor: Actor,
    pub name: String,
    pub slug: Option<String>,
    pub sort_order: i32,
}

pub type CreateCategoryResult = Category;

pub struct CreateCategoryHandler {
    categories: Arc<dyn CategoryRepository>,
    clock: Arc<dyn Clock>,
}

impl CreateCategoryHandler {
    pub fn new(categories: Arc<dyn CategoryRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { categories, clock }
    }

    pub async fn handle(
        &self,
        cmd: CreateCategoryCommand,
    ) -> Result<CreateCategoryResult, ContentError> {
        ensure_can_edit(&cmd.actor, "create categories")?;

        let category = Category::new(
            &cmd.name,
            cmd.slug.as_deref(),
            cmd.sort_order,
            self.clock.now(),
        )?;
        self.categories.create(&category).await?;

        info!(category_id = %category.id, slug = %category.slug, "Category created");
        Ok(category)
    }
}
