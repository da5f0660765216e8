//! Errors raised while authenticating a billing webhook.
//!
//! All of them mean the request is rejected before any state is touched.

use thiserror::Error;

use super::MembershipError;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WebhookError {
    /// Request carried no signature header.
    #[error("Missing signature")]
    MissingSignature,

    /// No provided signature matched the expected one.
    #[error("Invalid signature")]
    InvalidSignature,

    /// Signed timestamp is older than the tolerance window.
    #[error("Timestamp out of range")]
    TimestampOutOfRange,

    /// Signed timestamp lies in the future beyond clock skew tolerance.
    #[error("Invalid timestamp")]
    InvalidTimestamp,

    /// Signature header could not be parsed.
    #[error("Parse error: {0}")]
    ParseError(String),
}

impl From<WebhookError> for MembershipError {
    fn from(err: WebhookError) -> Self {
        MembershipError::invalid_webhook_signature(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn errors_display_their_cause() {
        assert_eq!(WebhookError::InvalidSignature.to_string(), "Invalid signature");
        assert_eq!(
            WebhookError::ParseError("missing timestamp".to_string()).to_string(),
            "Parse error: missing timestamp"
        );
    }

    #[test]
    fn every_webhook_error_becomes_signature_rejection() {
        for err in [
            WebhookError::MissingSignature,
            WebhookError::InvalidSignature,
            WebhookError::TimestampOutOfRange,
            WebhookError::InvalidTimestamp,
            WebhookError::ParseError("x".to_string()),
        ] {
            let converted: MembershipError = err.into();
            assert!(matches!(
                converted,
                MembershipError::InvalidWebhookSignature { .. }
            ));
        }
    }
}
