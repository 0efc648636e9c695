//! Screen endpoints.
//!
//! The request path below `/api` is the client route, so one handler
//! serves every page: `/api/doctors/1?book=true` renders `/doctors/1?book=true`.

use axum::extract::State;
use axum::http::{StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::{Extension, Json};

use crate::api::error::ApiError;
use crate::api::types::{ApiContext, SessionContext};
use crate::views::{self, Route, View};

/// `GET /api/home`
pub async fn home(
    State(ctx): State<ApiContext>,
    Extension(caller): Extension<SessionContext>,
) -> Result<Response, ApiError> {
    respond(&ctx, &caller, &Route::Home)
}

/// `GET /api/{hospitals,doctors,appointments,dashboard,login,register}[/:id]`
pub async fn show(
    State(ctx): State<ApiContext>,
    Extension(caller): Extension<SessionContext>,
    uri: Uri,
) -> Result<Response, ApiError> {
    let route = Route::from_uri(&uri)?;
    respond(&ctx, &caller, &route)
}

/// Fallback for every unmatched path.
pub async fn not_found(uri: Uri) -> Response {
    tracing::debug!(path = %uri.path(), "Unmatched request");
    (StatusCode::NOT_FOUND, Json(View::page_not_found())).into_response()
}

fn respond(ctx: &ApiContext, caller: &SessionContext, route: &Route) -> Result<Response, ApiError> {
    let view = views::render(route, &caller.session, ctx.core.catalog())?;
    let status = if view.is_not_found() {
        StatusCode::NOT_FOUND
    } else if view.is_access_restricted() {
        StatusCode::FORBIDDEN
    } else {
        StatusCode::OK
    };
    Ok((status, Json(view)).into_response())
}
