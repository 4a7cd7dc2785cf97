//! # roster-server
//!
//! HTTP transport for the roster service.
//!
//! Requests flow through a single path:
//!
//! 1. the route table strips any stage prefix and resolves the operation
//! 2. protected operations pass the bearer step ([`middleware::auth`])
//! 3. exactly one handler runs with a typed [`RequestContext`]
//! 4. errors become JSON bodies via [`ApiError`]

pub mod context;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod operations;
pub mod routes;
pub mod state;

pub use context::RequestContext;
pub use error::ApiError;
pub use operations::{Operation, route_table};
pub use routes::create_router;
pub use state::AppState;
