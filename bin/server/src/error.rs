//! Error responses for the HTTP surface.
//!
//! Every handler failure becomes an [`ApiError`], rendered as a JSON body
//! with an `error` field. Store failures are logged here with the operation
//! that failed; the caller only sees a generic message.

use axum::{
    Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use league_portal_authz::AuthzError;
use league_portal_roster::ValidationError;
use serde::de::DeserializeOwned;
use serde_json::json;
use std::fmt;

/// A failed request, mapped onto an HTTP status.
#[derive(Debug)]
pub enum ApiError {
    /// Missing or malformed input. No store call was made.
    Validation(ValidationError),
    /// No valid session where one is required.
    Unauthorized,
    /// Session present but lacking ownership or role.
    Forbidden,
    /// Target row does not exist.
    NotFound { message: &'static str },
    /// The data store failed. Already logged.
    Store { message: &'static str },
    /// Legacy admin password mismatch.
    InvalidPassword,
}

impl ApiError {
    /// Logs a store failure and returns the generic error for it.
    pub fn store(message: &'static str, report: impl fmt::Display) -> Self {
        tracing::error!(error = %report, "{message}");
        Self::Store { message }
    }

    /// Shorthand for a validation failure.
    pub fn invalid(field: &'static str, message: &'static str) -> Self {
        Self::Validation(ValidationError::new(field, message))
    }

    fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized | Self::InvalidPassword => StatusCode::UNAUTHORIZED,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Store { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Unauthorized => write!(f, "Unauthorized"),
            Self::Forbidden => write!(f, "Forbidden"),
            Self::NotFound { message } | Self::Store { message } => write!(f, "{message}"),
            Self::InvalidPassword => write!(f, "Invalid password"),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        Self::Validation(err)
    }
}

impl From<AuthzError> for ApiError {
    fn from(err: AuthzError) -> Self {
        match err {
            AuthzError::NotAuthenticated { .. } => Self::Unauthorized,
            AuthzError::Forbidden { .. } => Self::Forbidden,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match &self {
            Self::InvalidPassword => json!({ "success": false, "error": self.to_string() }),
            _ => json!({ "error": self.to_string() }),
        };
        (status, Json(body)).into_response()
    }
}

/// JSON body extractor whose rejections are validation errors.
///
/// Behaves like [`axum::Json`] but answers malformed bodies with 400 and
/// the usual `{"error": ...}` shape.
pub struct ApiJson<T>(pub T);

impl<T, S> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => {
                tracing::debug!(reason = %rejection.body_text(), "rejected request body");
                Err(ApiError::invalid("body", body_message(&rejection)))
            }
        }
    }
}

fn body_message(rejection: &JsonRejection) -> &'static str {
    match rejection {
        JsonRejection::MissingJsonContentType(_) => "Expected a JSON request body",
        _ => "Invalid JSON body",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn render(err: ApiError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn validation_renders_message_as_400() {
        let (status, body) =
            render(ApiError::invalid("displayOrder", "Display order is required")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "error": "Display order is required" }));
    }

    #[tokio::test]
    async fn store_failure_hides_details() {
        let (status, body) = render(ApiError::store(
            "Failed to create season",
            "duplicate key value violates unique constraint",
        ))
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({ "error": "Failed to create season" }));
    }

    #[tokio::test]
    async fn invalid_password_carries_success_flag() {
        let (status, body) = render(ApiError::InvalidPassword).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body, json!({ "success": false, "error": "Invalid password" }));
    }

    #[test]
    fn authz_errors_map_to_status() {
        use league_portal_authz::Action;

        let err: ApiError = AuthzError::NotAuthenticated {
            action: Action::UpdateSeason,
        }
        .into();
        assert_eq!(err.status(), StatusCode::UNAUTHORIZED);

        let err: ApiError = AuthzError::Forbidden {
            action: Action::UpdateSeason,
        }
        .into();
        assert_eq!(err.status(), StatusCode::FORBIDDEN);
    }
}
