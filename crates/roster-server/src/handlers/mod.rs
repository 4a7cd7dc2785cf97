//! Request entry point and per-operation handlers.
//!
//! axum only supplies the transport: every request lands in [`dispatch`],
//! which resolves it through the route table, runs the bearer step for
//! protected operations and then calls exactly one operation.

pub mod auth;
pub mod clients;
pub mod health;

use crate::context::RequestContext;
use crate::error::ApiError;
use crate::middleware::authenticate;
use crate::operations::Operation;
use crate::state::AppState;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, Method, Uri};
use axum::response::{IntoResponse, Response};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Instant;

pub async fn dispatch(
    State(state): State<Arc<AppState>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let started = Instant::now();
    let mut logged_path = uri.path().to_string();

    let response = match handle(&state, &method, &uri, &headers, body, &mut logged_path).await {
        Ok(response) => response,
        Err(err) => err.into_response(),
    };

    tracing::info!(
        method = %method,
        path = %logged_path,
        status = response.status().as_u16(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "request"
    );
    response
}

async fn handle(
    state: &AppState,
    method: &Method,
    uri: &Uri,
    headers: &HeaderMap,
    body: Bytes,
    logged_path: &mut String,
) -> Result<Response, ApiError> {
    let matched = state.routes.resolve(method, uri.path())?;
    let operation = *matched.operation;
    logged_path.clone_from(&matched.path);

    let identity = if operation.is_protected() {
        Some(authenticate(&state.auth, headers)?)
    } else {
        None
    };

    let ctx = RequestContext {
        path: matched.path,
        params: matched.params,
        identity,
    };
    run(operation, state, ctx, body).await
}

async fn run(
    operation: Operation,
    state: &AppState,
    ctx: RequestContext,
    body: Bytes,
) -> Result<Response, ApiError> {
    tracing::debug!(operation = operation.name(), path = %ctx.path, "dispatching");
    match operation {
        Operation::Health => Ok(health::health().await),
        Operation::ListClients => clients::list(state).await,
        Operation::ActiveClients => clients::active(state).await,
        Operation::InactiveClients => clients::inactive(state).await,
        Operation::CreateClient => clients::create(state, body).await,
        Operation::ClientById => clients::by_id(state, &ctx).await,
        Operation::Register => auth::register(state, body).await,
        Operation::Login => auth::login(state, body).await,
        Operation::Me => auth::me(state, &ctx).await,
    }
}

/// Decode a JSON request body; an empty or invalid body is a 400.
pub(crate) fn parse_json<T: DeserializeOwned>(body: &Bytes) -> Result<T, ApiError> {
    serde_json::from_slice(body).map_err(ApiError::invalid_body)
}
