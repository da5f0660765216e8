//! Identity extractors for axum.
//!
//! The upstream identity provider authenticates the caller and forwards the
//! result as trusted headers:
//!
//! ```text
//! X-User-Id:    <opaque user id>          (absent => anonymous)
//! X-User-Email: <address>                 (optional)
//! X-User-Role:  ADMIN | EDITOR | READER   (absent => READER)
//! ```
//!
//! - `AuthenticatedUser` - requires a caller, 401 otherwise
//! - `OptionalUser` - anonymous callers allowed

use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::domain::foundation::{Actor, UserId, UserRole};

use super::super::error::ErrorResponse;

pub const USER_ID_HEADER: &str = "X-User-Id";
pub const USER_EMAIL_HEADER: &str = "X-User-Email";
pub const USER_ROLE_HEADER: &str = "X-User-Role";

/// Why identity extraction failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthRejection {
    Unauthenticated,
    InvalidRole(String),
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        let body = match self {
            AuthRejection::Unauthenticated => {
                ErrorResponse::new("UNAUTHORIZED", "Authentication required")
            }
            AuthRejection::InvalidRole(role) => {
                ErrorResponse::new("UNAUTHORIZED", format!("Unrecognized role: {}", role))
            }
        };
        (StatusCode::UNAUTHORIZED, Json(body)).into_response()
    }
}

fn header<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
}

/// Reads the caller from trusted headers. `Ok(None)` for anonymous requests.
pub fn actor_from_headers(headers: &HeaderMap) -> Result<Option<Actor>, AuthRejection> {
    let Some(user_id) = header(headers, USER_ID_HEADER).and_then(|id| UserId::new(id).ok())
    else {
        return Ok(None);
    };

    let role = match header(headers, USER_ROLE_HEADER) {
        Some(raw) => raw
            .parse::<UserRole>()
            .map_err(|_| AuthRejection::InvalidRole(raw.to_string()))?,
        None => UserRole::Reader,
    };
    let email = header(headers, USER_EMAIL_HEADER).map(str::to_string);

    Ok(Some(Actor::new(user_id, email, role)))
}

/// Extractor that requires an identified caller.
///
/// ```ignore
/// async fn my_handler(AuthenticatedUser(actor): AuthenticatedUser) -> impl IntoResponse {
///     actor.user_id.to_string()
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub Actor);

#[async_trait]
impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        actor_from_headers(&parts.headers)?
            .map(AuthenticatedUser)
            .ok_or(AuthRejection::Unauthenticated)
    }
}

/// Extractor for routes open to anonymous readers.
#[derive(Debug, Clone)]
pub struct OptionalUser(pub Option<Actor>);

#[async_trait]
impl<S> FromRequestParts<S> for OptionalUser
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        actor_from_headers(&parts.headers).map(OptionalUser)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(pairs: &[(&'static str, &'static str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in pairs {
            map.insert(*name, HeaderValue::from_static(value));
        }
        map
    }

    #[test]
    fn no_user_id_is_anonymous() {
        assert_eq!(actor_from_headers(&headers(&[])), Ok(None));
        assert_eq!(actor_from_headers(&headers(&[("x-user-id", "  ")])), Ok(None));
    }

    #[test]
    fn role_defaults_to_reader() {
        let actor = actor_from_headers(&headers(&[("x-user-id", "user-1")]))
            .unwrap()
            .unwrap();
        assert_eq!(actor.user_id.as_str(), "user-1");
        assert_eq!(actor.role, UserRole::Reader);
        assert!(actor.email.is_none());
    }

    #[test]
    fn reads_email_and_role() {
        let actor = actor_from_headers(&headers(&[
            ("x-user-id", "user-2"),
            ("x-user-email", "ed@example.com"),
            ("x-user-role", "editor"),
        ]))
        .unwrap()
        .unwrap();
        assert_eq!(actor.role, UserRole::Editor);
        assert_eq!(actor.email.as_deref(), Some("ed@example.com"));
    }

    #[test]
    fn unknown_role_is_rejected() {
        let err = actor_from_headers(&headers(&[
            ("x-user-id", "user-3"),
            ("x-user-role", "superuser"),
        ]))
        .unwrap_err();
        assert_eq!(err, AuthRejection::InvalidRole("superuser".to_string()));
    }
}
