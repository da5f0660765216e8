//! Maps application errors onto HTTP responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use tracing::error;

use crate::domain::content::ContentError;
use crate::domain::membership::MembershipError;

/// JSON error body shared by every endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling.
    pub error_code: String,
    /// Human-readable error message.
    pub message: String,
}

impl ErrorResponse {
    pub fn new(error_code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error_code: error_code.into(),
            message: message.into(),
        }
    }
}

/// Any error a route can return.
#[derive(Debug)]
pub enum ApiError {
    Membership(MembershipError),
    Content(ContentError),
}

impl From<MembershipError> for ApiError {
    fn from(err: MembershipError) -> Self {
        ApiError::Membership(err)
    }
}

impl From<ContentError> for ApiError {
    fn from(err: ContentError) -> Self {
        ApiError::Content(err)
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Membership(err) => match err {
                MembershipError::NotFoundForUser(_) => StatusCode::NOT_FOUND,
                MembershipError::BillingNotConfigured => StatusCode::INTERNAL_SERVER_ERROR,
                MembershipError::InvalidWebhookSignature { .. }
                | MembershipError::MalformedEvent { .. }
                | MembershipError::ValidationFailed { .. } => StatusCode::BAD_REQUEST,
                MembershipError::InvalidState { .. } => StatusCode::CONFLICT,
                MembershipError::Provider { .. } => StatusCode::BAD_GATEWAY,
                MembershipError::Infrastructure(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            ApiError::Content(err) => match err {
                ContentError::NotFound { .. } => StatusCode::NOT_FOUND,
                ContentError::ValidationFailed { .. } => StatusCode::BAD_REQUEST,
                ContentError::Unauthorized => StatusCode::UNAUTHORIZED,
                ContentError::Forbidden { .. } => StatusCode::FORBIDDEN,
                ContentError::Conflict(_) => StatusCode::CONFLICT,
                ContentError::Infrastructure(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }

    fn body(&self) -> ErrorResponse {
        match self {
            // Store and driver details stay in the logs.
            ApiError::Membership(MembershipError::Infrastructure(_))
            | ApiError::Content(ContentError::Infrastructure(_)) => {
                ErrorResponse::new("INTERNAL_ERROR", "Internal server error")
            }
            ApiError::Membership(err) => ErrorResponse::new(err.code().to_string(), err.message()),
            ApiError::Content(err) => ErrorResponse::new(err.code().to_string(), err.message()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            match &self {
                ApiError::Membership(err) => error!(error = %err, "Request failed"),
                ApiError::Content(err) => error!(error = %err, "Request failed"),
            }
        }
        (status, Json(self.body())).into_response()
    }
}
