//! Router assembly.

use crate::handlers;
use crate::state::AppState;
use axum::Router;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// The whole service: one fallback handler that feeds the dispatcher.
///
/// axum's own path routing is not used, so its prefix semantics never decide
/// precedence. `TraceLayer` only opens the request span; the completion line
/// comes from [`handlers::dispatch`], which knows the rewritten path.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .fallback(handlers::dispatch)
        .with_state(state)
        .layer(TraceLayer::new_for_http().on_request(()).on_response(()))
}
