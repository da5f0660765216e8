//! Post categories (site sections).

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{slugify, CategoryId, Timestamp, ValidationError};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub slug: String,
    /// Position in navigation, ascending.
    pub sort_order: i32,
    pub created_at: Timestamp,
}

impl Category {
    /// Builds a category, deriving the slug from the name when none is given.
    pub fn new(
        name: &str,
        slug: Option<&str>,
        sort_order: i32,
        now: Timestamp,
    ) -> Result<Self, ValidationError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ValidationError::empty_field("name"));
        }
        let slug = match slug.map(str::trim).filter(|s| !s.is_empty()) {
            Some(given) => slugify(given),
            None => slugify(name),
        };
        if slug.is_empty() {
            return Err(ValidationError::invalid_format(
                "slug",
                "must contain letters or digits",
            ));
        }
        Ok(Self {
            id: CategoryId::new(),
            name: name.to_string(),
            slug,
            sort_order,
            created_at: now,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slug_defaults_to_slugified_name() {
        let c = Category::new("World News", None, 3, Timestamp::now()).unwrap();
        assert_eq!(c.slug, "world-news");
        assert_eq!(c.sort_order, 3);
    }

    #[test]
    fn explicit_slug_is_normalized() {
        let c = Category::new("Tech", Some("Sci & Tech"), 0, Timestamp::now()).unwrap();
        assert_eq!(c.slug, "sci-tech");
    }

    #[test]
    fn blank_name_is_rejected() {
        assert!(Category::new(" ", None, 0, Timestamp::now()).is_err());
    }

    #[test]
    fn symbol_only_name_is_rejected() {
        assert!(Category::new("???", None, 0, Timestamp::now()).is_err());
    }
}
