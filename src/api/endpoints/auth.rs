//! Login, registration and logout.
//!
//! - `POST /api/auth/login` / `POST /api/auth/register` return a bearer token
//! - `POST /api/auth/logout` forgets the caller's token
//! - `GET /api/auth/me` returns the logged-in user, or `null`

use axum::extract::State;
use axum::http::StatusCode;
use axum::{Extension, Json};
use serde::Serialize;

use crate::api::error::ApiError;
use crate::api::types::{ApiContext, SessionContext};
use crate::auth::{AuthError, Credentials};
use crate::forms::RegisterForm;
use crate::models::SessionUser;
use crate::notification::Notification;
use crate::session::Session;

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub token: String,
    pub user: SessionUser,
    pub notification: Notification,
}

#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub user: Option<SessionUser>,
}

/// `POST /api/auth/login`
pub async fn login(
    State(ctx): State<ApiContext>,
    Extension(caller): Extension<SessionContext>,
    Json(credentials): Json<Credentials>,
) -> Result<Json<SessionResponse>, ApiError> {
    let SessionContext { token, mut session } = caller;
    let user = session
        .login(ctx.core.authenticator(), &credentials)?
        .clone();
    let token = store_session(&ctx, token.as_deref(), session)?;

    Ok(Json(SessionResponse {
        token,
        user,
        notification: Notification::success(
            "Welcome back!",
            "You have been logged in successfully.",
        ),
    }))
}

/// `POST /api/auth/register`
pub async fn register(
    State(ctx): State<ApiContext>,
    Extension(caller): Extension<SessionContext>,
    Json(form): Json<RegisterForm>,
) -> Result<Json<SessionResponse>, ApiError> {
    let registration = form.validate()?;
    let SessionContext { token, mut session } = caller;
    let user = session
        .register(ctx.core.authenticator(), &registration)
        .map_err(registration_failed)?
        .clone();
    let token = store_session(&ctx, token.as_deref(), session)?;

    let description = format!(
        "Welcome to AidPoint! Your {} account has been created successfully.",
        user.role
    );
    Ok(Json(SessionResponse {
        token,
        user,
        notification: Notification::success("Account Created!", description),
    }))
}

/// `POST /api/auth/logout`
pub async fn logout(
    State(ctx): State<ApiContext>,
    Extension(caller): Extension<SessionContext>,
) -> Result<StatusCode, ApiError> {
    if let Some(token) = caller.token {
        let mut session = caller.session;
        session.logout();
        ctx.core.close_session(&token)?;
    }
    Ok(StatusCode::NO_CONTENT)
}

/// `GET /api/auth/me`
pub async fn me(Extension(caller): Extension<SessionContext>) -> Json<MeResponse> {
    Json(MeResponse {
        user: caller.session.user().cloned(),
    })
}

/// Keep the caller's token when it has one, otherwise issue a new one.
fn store_session(
    ctx: &ApiContext,
    existing: Option<&str>,
    session: Session,
) -> Result<String, ApiError> {
    if let Some(token) = existing {
        if ctx.core.replace_session(token, session.clone())? {
            return Ok(token.to_string());
        }
    }
    Ok(ctx.core.open_session(session)?)
}

fn registration_failed(err: AuthError) -> ApiError {
    match ApiError::from(err) {
        ApiError::Rejected {
            status,
            code,
            notification,
        } => ApiError::Rejected {
            status,
            code,
            notification: Notification::destructive(
                "Registration Failed",
                notification.description,
            ),
        },
        other => other,
    }
}
