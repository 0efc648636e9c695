//! API error types with structured JSON responses.
//!
//! Domain failures that the UI reports as a toast carry their
//! `Notification` in the body next to the machine-readable code.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::auth::AuthError;
use crate::booking::BookingError;
use crate::core_state::CoreError;
use crate::dashboard::DashboardError;
use crate::filter::FilterError;
use crate::forms::FormError;
use crate::models::Role;
use crate::notification::Notification;
use crate::views::RouteError;

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notification: Option<Notification>,
}

#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: &'static str,
    pub message: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Authentication required")]
    Unauthorized,
    #[error("Requires the {0} role")]
    Forbidden(Role),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Invalid request: {0}")]
    BadRequest(String),
    /// A command refused by domain validation.
    #[error("{code}: {}", .notification.description)]
    Rejected {
        status: StatusCode,
        code: &'static str,
        notification: Notification,
    },
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub(crate) fn rejected(status: StatusCode, code: &'static str, notification: Notification) -> Self {
        ApiError::Rejected {
            status,
            code,
            notification,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message, notification) = match self {
            ApiError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "AUTH_REQUIRED",
                "Authentication required".to_string(),
                None,
            ),
            ApiError::Forbidden(role) => (
                StatusCode::FORBIDDEN,
                "ROLE_REQUIRED",
                format!("This action requires a {role} account"),
                None,
            ),
            ApiError::NotFound(detail) => (StatusCode::NOT_FOUND, "NOT_FOUND", detail, None),
            ApiError::BadRequest(detail) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", detail, None),
            ApiError::Rejected {
                status,
                code,
                notification,
            } => {
                tracing::debug!(code, %status, "Command rejected");
                (status, code, notification.description.clone(), Some(notification))
            }
            ApiError::Internal(detail) => {
                tracing::error!(detail, "API internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL",
                    "An internal error occurred".to_string(),
                    None,
                )
            }
        };

        let body = ErrorBody {
            error: ErrorDetail { code, message },
            notification,
        };
        (status, Json(body)).into_response()
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::LockPoisoned => ApiError::Internal("lock poisoned".into()),
            CoreError::Catalog(e) => ApiError::Internal(e.to_string()),
        }
    }
}

impl From<FilterError> for ApiError {
    fn from(err: FilterError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}

impl From<RouteError> for ApiError {
    fn from(err: RouteError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        let description = match err {
            AuthError::InvalidCredentials => {
                "Please check your credentials and try again.".to_string()
            }
            _ => err.to_string(),
        };
        let note = Notification::destructive("Login Failed", description);
        match err {
            AuthError::InvalidCredentials => {
                ApiError::rejected(StatusCode::UNAUTHORIZED, "INVALID_CREDENTIALS", note)
            }
            AuthError::RoleNotSelfAssignable(_) => {
                ApiError::rejected(StatusCode::UNPROCESSABLE_ENTITY, "ROLE_NOT_ALLOWED", note)
            }
            AuthError::Unavailable(_) => {
                ApiError::rejected(StatusCode::SERVICE_UNAVAILABLE, "AUTH_UNAVAILABLE", note)
            }
        }
    }
}

impl From<FormError> for ApiError {
    fn from(err: FormError) -> Self {
        ApiError::rejected(
            StatusCode::UNPROCESSABLE_ENTITY,
            "FORM_INVALID",
            err.to_notification(),
        )
    }
}

impl From<BookingError> for ApiError {
    fn from(err: BookingError) -> Self {
        let (status, code) = match err {
            BookingError::LoginRequired => (StatusCode::UNAUTHORIZED, "AUTH_REQUIRED"),
            BookingError::AlreadyCancelled => (StatusCode::CONFLICT, "ALREADY_CANCELLED"),
            _ => (StatusCode::UNPROCESSABLE_ENTITY, "BOOKING_INVALID"),
        };
        ApiError::rejected(status, code, err.to_notification())
    }
}

impl From<DashboardError> for ApiError {
    fn from(err: DashboardError) -> Self {
        ApiError::rejected(
            StatusCode::UNPROCESSABLE_ENTITY,
            "UPDATE_REJECTED",
            err.to_notification(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn json_of(response: Response) -> serde_json::Value {
        let body = to_bytes(response.into_body(), 4096).await.unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn unauthorized_returns_401() {
        let response = ApiError::Unauthorized.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let json = json_of(response).await;
        assert_eq!(json["error"]["code"], "AUTH_REQUIRED");
        assert!(json.get("notification").is_none());
    }

    #[tokio::test]
    async fn forbidden_names_the_role() {
        let response = ApiError::Forbidden(Role::Hospital).into_response();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        let json = json_of(response).await;
        assert_eq!(json["error"]["message"], "This action requires a hospital account");
    }

    #[tokio::test]
    async fn internal_hides_details() {
        let response = ApiError::Internal("something broke".into()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let json = json_of(response).await;
        assert_eq!(json["error"]["message"], "An internal error occurred");
    }

    #[tokio::test]
    async fn booking_login_required_carries_toast() {
        let response = ApiError::from(BookingError::LoginRequired).into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let json = json_of(response).await;
        assert_eq!(json["notification"]["title"], "Please log in");
        assert_eq!(json["notification"]["variant"], "destructive");
    }

    #[tokio::test]
    async fn form_errors_are_unprocessable() {
        let response = ApiError::from(FormError::PasswordMismatch).into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let json = json_of(response).await;
        assert_eq!(json["error"]["code"], "FORM_INVALID");
        assert_eq!(json["notification"]["title"], "Password Mismatch");
    }

    #[tokio::test]
    async fn filter_errors_are_bad_requests() {
        let err = FilterError::InvalidDay("Funday".into());
        let response = ApiError::from(err).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn core_lock_poisoned_maps_to_internal() {
        let api_err: ApiError = CoreError::LockPoisoned.into();
        assert!(matches!(api_err, ApiError::Internal(_)));
    }
}
