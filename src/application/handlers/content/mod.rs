//! Editorial handlers for posts and categories.
//!
//! Editors and admins may list, create and update; deletes are admin-only.

mod create_category;
mod create_post;
mod delete_category;
mod delete_post;
mod list_categories;
mod list_posts;
mod update_category;
mod update_post;

// Posts
pub use create_post::{CreatePostCommand, CreatePostHandler, CreatePostResult};
pub use delete_post::{DeletePostCommand, DeletePostHandler};
pub use list_posts::{ListPostsHandler, ListPostsQuery, ListPostsResult};
pub use update_post::{UpdatePostCommand, UpdatePostHandler, UpdatePostResult};

// Categories
pub use create_category::{CreateCategoryCommand, CreateCategoryHandler, CreateCategoryResult};
pub use delete_category::{DeleteCategoryCommand, DeleteCategoryHandler};
pub use list_categories::{ListCategoriesHandler, ListCategoriesQuery, ListCategoriesResult};
pub use update_category::{UpdateCategoryCommand, UpdateCategoryHandler, UpdateCategoryResult};
