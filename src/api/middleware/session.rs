//! Bearer token resolution.
//!
//! Reads `Authorization: Bearer <token>` and injects the matching
//! `SessionContext` into request extensions. Nothing is rejected here:
//! a missing or unknown token resolves to the anonymous session and each
//! handler decides what an anonymous caller may do.

use axum::http::Request;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use crate::api::error::ApiError;
use crate::api::types::{ApiContext, SessionContext};

pub async fn resolve_session(req: Request<axum::body::Body>, next: Next) -> Response {
    match resolve_session_inner(req, next).await {
        Ok(resp) => resp,
        Err(err) => err.into_response(),
    }
}

async fn resolve_session_inner(
    mut req: Request<axum::body::Body>,
    next: Next,
) -> Result<Response, ApiError> {
    let ctx: ApiContext = req
        .extensions()
        .get::<ApiContext>()
        .cloned()
        .ok_or(ApiError::Internal("missing API context".into()))?;

    let token = bearer_token(&req);

    let context = match token {
        Some(token) => match ctx.core.session_for(&token)? {
            Some(session) => SessionContext {
                token: Some(token),
                session,
            },
            None => {
                tracing::debug!("Unknown bearer token, continuing anonymously");
                SessionContext::anonymous()
            }
        },
        None => SessionContext::anonymous(),
    };
    // Session write guard is dropped before the handler runs

    req.extensions_mut().insert(context);
    Ok(next.run(req).await)
}

fn bearer_token(req: &Request<axum::body::Body>) -> Option<String> {
    req.headers()
        .get("Authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
}
