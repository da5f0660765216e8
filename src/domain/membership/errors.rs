//! Membership-specific error types.
//!
//! # HTTP Status Mapping
//!
//! | Error | HTTP Status |
//! |-------|-------------|
//! | NotFoundForUser | 404 |
//! | BillingNotConfigured | 500 |
//! | InvalidWebhookSignature | 400 |
//! | MalformedEvent | 400 |
//! | InvalidState | 409 |
//! | ValidationFailed | 400 |
//! | Provider | 502 |
//! | Infrastructure | 500 |

use crate::domain::foundation::{DomainError, ErrorCode, UserId};

/// Membership-specific errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MembershipError {
    /// No membership exists for this user.
    NotFoundForUser(UserId),

    /// The billing provider capability is absent from configuration.
    BillingNotConfigured,

    /// Webhook signature missing, malformed, stale or not matching.
    InvalidWebhookSignature { reason: String },

    /// Signature was valid but the payload could not be understood.
    MalformedEvent { reason: String },

    /// Invalid state for the requested operation.
    InvalidState { current: String, attempted: String },

    /// Validation failed.
    ValidationFailed { field: String, message: String },

    /// The billing provider rejected or failed a call.
    Provider { message: String, retryable: bool },

    /// Store or other infrastructure error.
    Infrastructure(String),
}

impl MembershipError {
    pub fn not_found_for_user(user_id: UserId) -> Self {
        MembershipError::NotFoundForUser(user_id)
    }

    pub fn billing_not_configured() -> Self {
        MembershipError::BillingNotConfigured
    }

    pub fn invalid_webhook_signature(reason: impl Into<String>) -> Self {
        MembershipError::InvalidWebhookSignature {
            reason: reason.into(),
        }
    }

    pub fn malformed_event(reason: impl Into<String>) -> Self {
        MembershipError::MalformedEvent {
            reason: reason.into(),
        }
    }

    pub fn invalid_state(current: impl Into<String>, attempted: impl Into<String>) -> Self {
        MembershipError::InvalidState {
            current: current.into(),
            attempted: attempted.into(),
        }
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        MembershipError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn provider(message: impl Into<String>, retryable: bool) -> Self {
        MembershipError::Provider {
            message: message.into(),
            retryable,
        }
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        MembershipError::Infrastructure(message.into())
    }

    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            MembershipError::NotFoundForUser(_) => ErrorCode::MembershipNotFound,
            MembershipError::BillingNotConfigured => ErrorCode::BillingNotConfigured,
            MembershipError::InvalidWebhookSignature { .. } => ErrorCode::InvalidWebhookSignature,
            MembershipError::MalformedEvent { .. } => ErrorCode::InvalidFormat,
            MembershipError::InvalidState { .. } => ErrorCode::InvalidStateTransition,
            MembershipError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            MembershipError::Provider { .. } => ErrorCode::ExternalServiceError,
            MembershipError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }

    /// Returns a user-friendly error message.
    pub fn message(&self) -> String {
        match self {
            MembershipError::NotFoundForUser(user_id) => {
                format!("No membership found for user: {}", user_id)
            }
            MembershipError::BillingNotConfigured => {
                "Billing provider not configured".to_string()
            }
            MembershipError::InvalidWebhookSignature { reason } => {
                format!("Invalid webhook signature: {}", reason)
            }
            MembershipError::MalformedEvent { reason } => {
                format!("Malformed billing event: {}", reason)
            }
            MembershipError::InvalidState { current, attempted } => {
                format!("Cannot {} membership in {} state", attempted, current)
            }
            MembershipError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            MembershipError::Provider { message, .. } => {
                format!("Billing provider error: {}", message)
            }
            MembershipError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }

    /// Returns true if this error should trigger a retry.
    pub fn is_retryable(&self) -> bool {
        match self {
            MembershipError::Infrastructure(_) => true,
            MembershipError::Provider { retryable, .. } => *retryable,
            _ => false,
        }
    }
}

impl std::fmt::Display for MembershipError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for MembershipError {}

impl From<DomainError> for MembershipError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::ValidationFailed
            | ErrorCode::EmptyField
            | ErrorCode::OutOfRange
            | ErrorCode::InvalidFormat => MembershipError::ValidationFailed {
                field: err
                    .details
                    .get("field")
                    .cloned()
                    .unwrap_or_else(|| "unknown".to_string()),
                message: err.message,
            },
            ErrorCode::BillingNotConfigured => MembershipError::BillingNotConfigured,
            _ => MembershipError::Infrastructure(err.to_string()),
        }
    }
}

impl From<MembershipError> for DomainError {
    fn from(err: MembershipError) -> Self {
        DomainError::new(err.code(), err.message())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn billing_not_configured_has_distinct_code() {
        let err = MembershipError::billing_not_configured();
        assert_eq!(err.code(), ErrorCode::BillingNotConfigured);
        assert_eq!(err.message(), "Billing provider not configured");
        assert!(!err.is_retryable());
    }

    #[test]
    fn invalid_signature_is_not_retryable() {
        let err = MembershipError::invalid_webhook_signature("missing header");
        assert_eq!(err.code(), ErrorCode::InvalidWebhookSignature);
        assert!(err.message().contains("missing header"));
        assert!(!err.is_retryable());
    }

    #[test]
    fn infrastructure_is_retryable() {
        assert!(MembershipError::infrastructure("pool timed out").is_retryable());
    }

    #[test]
    fn provider_retryability_is_carried() {
        assert!(MembershipError::provider("timeout", true).is_retryable());
        assert!(!MembershipError::provider("bad price", false).is_retryable());
    }

    #[test]
    fn database_domain_error_becomes_infrastructure() {
        let err: MembershipError = DomainError::database("connection refused").into();
        assert!(matches!(err, MembershipError::Infrastructure(ref m) if m.contains("connection refused")));
    }

    #[test]
    fn validation_domain_error_keeps_field() {
        let err: MembershipError = DomainError::validation("user_id", "empty").into();
        assert_eq!(
            err,
            MembershipError::ValidationFailed {
                field: "user_id".to_string(),
                message: "empty".to_string()
            }
        );
    }

    #[test]
    fn converts_back_to_domain_error_with_code() {
        let err: DomainError = MembershipError::billing_not_configured().into();
        assert_eq!(err.code, ErrorCode::BillingNotConfigured);
    }
}
