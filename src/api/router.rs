//! API router.
//!
//! Returns a composable `Router` that can be mounted on any axum server.
//! Routes are nested under `/api/`; anything unmatched renders the
//! not-found view.
//!
//! Layer stack (outermost → innermost):
//! 1. Extension(ApiContext) → 2. CORS → 3. Trace → 4. Cache-Control → 5. Session resolver

use std::sync::Arc;

use axum::http::{header, HeaderValue};
use axum::routing::{get, post, put};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use crate::api::endpoints;
use crate::api::middleware;
use crate::api::types::ApiContext;
use crate::core_state::CoreState;

/// Build the API router.
///
/// Middleware reads `Extension<ApiContext>` (the outermost layer);
/// handlers use `State<ApiContext>` (provided via `with_state`).
pub fn api_router(core: Arc<CoreState>) -> Router {
    build_router(ApiContext::new(core))
}

fn build_router(ctx: ApiContext) -> Router {
    // NOTE: Path params use `:param` syntax (matchit 0.7 / axum 0.7).
    let api = Router::new()
        .route("/health", get(endpoints::health::check))
        // Screens
        .route("/home", get(endpoints::pages::home))
        .route("/hospitals", get(endpoints::pages::show))
        .route("/hospitals/:id", get(endpoints::pages::show))
        .route("/doctors", get(endpoints::pages::show))
        .route("/doctors/:id", get(endpoints::pages::show))
        .route("/appointments", get(endpoints::pages::show))
        .route("/dashboard", get(endpoints::pages::show))
        .route("/login", get(endpoints::pages::show))
        .route("/register", get(endpoints::pages::show))
        // Session
        .route("/auth/login", post(endpoints::auth::login))
        .route("/auth/register", post(endpoints::auth::register))
        .route("/auth/logout", post(endpoints::auth::logout))
        .route("/auth/me", get(endpoints::auth::me))
        // Commands
        .route("/doctors/:id/book", post(endpoints::doctors::book))
        .route(
            "/appointments/:id/cancel",
            post(endpoints::appointments::cancel),
        )
        .route(
            "/appointments/:id/reschedule",
            post(endpoints::appointments::reschedule),
        )
        .route("/dashboard/beds", put(endpoints::dashboard::update_beds))
        .route("/dashboard/pricing", put(endpoints::dashboard::update_pricing))
        .route("/dashboard/doctors", post(endpoints::dashboard::add_doctor))
        .route(
            "/chat",
            get(endpoints::chat::intro).post(endpoints::chat::send),
        )
        .with_state(ctx.clone());

    Router::new()
        .nest("/api", api)
        .fallback(endpoints::pages::not_found)
        .layer(axum::middleware::from_fn(middleware::session::resolve_session))
        .layer(SetResponseHeaderLayer::overriding(
            header::CACHE_CONTROL,
            HeaderValue::from_static("no-store"),
        ))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        // Extension must be outermost so middleware can extract ApiContext
        .layer(axum::Extension(ctx))
}
