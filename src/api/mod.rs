//! HTTP surface.
//!
//! Every screen and command is exposed as a JSON endpoint under `/api/`.
//! A single middleware resolves the caller's bearer token to a `Session`
//! (anonymous when absent or unknown) before any handler runs.
//!
//! `api_router()` returns a `Router` that can be mounted on any axum
//! server; `server::start_api_server_on` runs it in the background.

pub mod endpoints;
pub mod error;
pub mod middleware;
pub mod router;
pub mod server;
pub mod types;

pub use router::api_router;
pub use server::{start_api_server_on, ApiServer, ServerError};
pub use types::{ApiContext, SessionContext};
