//! Caller identity as supplied by the external identity provider.
//!
//! The provider's answer is trusted verbatim; nothing here authenticates.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::{UserId, ValidationError};

/// An authenticated caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    pub user_id: UserId,
    pub email: Option<String>,
    pub role: UserRole,
}

impl Actor {
    pub fn new(user_id: UserId, email: Option<String>, role: UserRole) -> Self {
        Self {
            user_id,
            email,
            role,
        }
    }
}

/// Role of the authenticated caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    Admin,
    Editor,
    #[default]
    Reader,
}

impl UserRole {
    /// May list, create and update posts and categories, and list ads.
    pub fn can_edit_content(&self) -> bool {
        matches!(self, UserRole::Admin | UserRole::Editor)
    }

    /// May create, update and delete ads, and delete posts.
    pub fn is_admin(&self) -> bool {
        matches!(self, UserRole::Admin)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Admin => "ADMIN",
            UserRole::Editor => "EDITOR",
            UserRole::Reader => "READER",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "ADMIN" => Ok(UserRole::Admin),
            "EDITOR" => Ok(UserRole::Editor),
            "READER" | "USER" => Ok(UserRole::Reader),
            other => Err(ValidationError::invalid_format(
                "role",
                format!("unknown role '{}'", other),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn editors_edit_but_do_not_administer() {
        assert!(UserRole::Editor.can_edit_content());
        assert!(!UserRole::Editor.is_admin());
        assert!(UserRole::Admin.can_edit_content());
        assert!(!UserRole::Reader.can_edit_content());
    }

    #[test]
    fn parses_case_insensitively() {
        assert_eq!("admin".parse::<UserRole>().unwrap(), UserRole::Admin);
        assert_eq!("User".parse::<UserRole>().unwrap(), UserRole::Reader);
        assert!("root".parse::<UserRole>().is_err());
    }
}
