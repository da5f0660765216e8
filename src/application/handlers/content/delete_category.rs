//! DeleteCategoryHandler - admins remove an empty section.

use std::sync::Arc;

use tracing::info;

use crate::application::authorization::ensure_admin;
use crate::domain::content::ContentError;
use crate::domain::foundation::{Actor, CategoryId};
use crate::ports::{CategoryRepository, PostRepository};

#[derive(Debug, Clone)]
pub struct DeleteCategoryCommand {
    pub actor: Actor,
    pub category_id: CategoryId,
}

pub struct DeleteCategoryHandler {
    categories: Arc<dyn CategoryRepository>,
    posts: Arc<dyn PostRepository>,
}

impl DeleteCategoryHandler {
    pub fn new(categories: Arc<dyn CategoryRepository>, posts: Arc<dyn PostRepository>) -> Self {
        Self { categories, posts }
    }

    /// Refuses while any post still belongs to the category.
    pub async fn handle(&self, cmd: DeleteCategoryCommand) -> Result<(), ContentError> {
        ensure_admin(&cmd.actor, "delete categories")?;

        let in_use = self.posts.count_by_category(&cmd.category_id).await?;
        if in_use > 0 {
            return Err(ContentError::conflict(format!(
                "Category still has {} post(s)",
                in_use
            )));
        }

        if !self.categories.delete(&cmd.category_id).await? {
            return Err(ContentError::not_found("category", cmd.category_id));
        }
        info!(category_id = %cmd.category_id, "Category deleted");
        Ok(())
    }
}
