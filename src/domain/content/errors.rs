//! Errors for posts, categories, ads and newsletter operations.

use crate::domain::foundation::{DomainError, ErrorCode, ValidationError};
use crate::domain::membership::MembershipError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentError {
    /// Referenced entity does not exist (or is not visible to the caller).
    NotFound { entity: &'static str, id: String },

    /// Input failed validation.
    ValidationFailed { field: String, message: String },

    /// Caller is not signed in.
    Unauthorized,

    /// Caller's role does not allow the action.
    Forbidden { action: &'static str },

    /// Operation conflicts with existing data.
    Conflict(String),

    /// Store or other infrastructure error.
    Infrastructure(String),
}

impl ContentError {
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        ContentError::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        ContentError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn forbidden(action: &'static str) -> Self {
        ContentError::Forbidden { action }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        ContentError::Conflict(message.into())
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        ContentError::Infrastructure(message.into())
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            ContentError::NotFound { entity, .. } => match *entity {
                "post" => ErrorCode::PostNotFound,
                "category" => ErrorCode::CategoryNotFound,
                "ad" => ErrorCode::AdNotFound,
                _ => ErrorCode::NotFound,
            },
            ContentError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            ContentError::Unauthorized => ErrorCode::Unauthorized,
            ContentError::Forbidden { .. } => ErrorCode::Forbidden,
            ContentError::Conflict(_) => ErrorCode::AlreadyExists,
            ContentError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }

    pub fn message(&self) -> String {
        match self {
            ContentError::NotFound { entity, id } => format!("{} not found: {}", entity, id),
            ContentError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            ContentError::Unauthorized => "Authentication required".to_string(),
            ContentError::Forbidden { action } => format!("Not allowed to {}", action),
            ContentError::Conflict(msg) => msg.clone(),
            ContentError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for ContentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ContentError {}

impl From<ValidationError> for ContentError {
    fn from(err: ValidationError) -> Self {
        ContentError::ValidationFailed {
            field: err.field().to_string(),
            message: err.to_string(),
        }
    }
}

impl From<DomainError> for ContentError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::ValidationFailed
            | ErrorCode::EmptyField
            | ErrorCode::OutOfRange
            | ErrorCode::InvalidFormat => ContentError::ValidationFailed {
                field: err
                    .details
                    .get("field")
                    .cloned()
                    .unwrap_or_else(|| "unknown".to_string()),
                message: err.message,
            },
            ErrorCode::AlreadyExists => ContentError::Conflict(err.message),
            _ => ContentError::Infrastructure(err.to_string()),
        }
    }
}

impl From<MembershipError> for ContentError {
    fn from(err: MembershipError) -> Self {
        ContentError::Infrastructure(err.message())
    }
}
