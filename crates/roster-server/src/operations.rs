//! The operations this service exposes and the table that routes to them.

use axum::http::Method;
use roster_dispatch::{RouteTable, StagePrefixes, TableError};

pub const CLIENTS_BUCKET: &str = "/api/clients/";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Health,
    ListClients,
    ActiveClients,
    InactiveClients,
    CreateClient,
    ClientById,
    Register,
    Login,
    Me,
}

impl Operation {
    /// Whether a verified bearer token is required before running.
    pub fn is_protected(self) -> bool {
        !matches!(
            self,
            Operation::Health | Operation::Register | Operation::Login
        )
    }

    pub fn name(self) -> &'static str {
        match self {
            Operation::Health => "health",
            Operation::ListClients => "list_clients",
            Operation::ActiveClients => "active_clients",
            Operation::InactiveClients => "inactive_clients",
            Operation::CreateClient => "create_client",
            Operation::ClientById => "client_by_id",
            Operation::Register => "register",
            Operation::Login => "login",
            Operation::Me => "me",
        }
    }
}

pub fn route_table(stages: StagePrefixes) -> Result<RouteTable<Operation>, TableError> {
    RouteTable::builder()
        .exact(Method::GET, "/health", Operation::Health)
        .exact(Method::GET, "/api/clients", Operation::ListClients)
        .reserved(Method::GET, CLIENTS_BUCKET, "active", Operation::ActiveClients)
        .reserved(Method::GET, CLIENTS_BUCKET, "inactive", Operation::InactiveClients)
        .reserved(Method::POST, CLIENTS_BUCKET, "add", Operation::CreateClient)
        .by_id(Method::GET, CLIENTS_BUCKET, Operation::ClientById)
        .exact(Method::POST, "/api/auth/register", Operation::Register)
        .exact(Method::POST, "/api/auth/login", Operation::Login)
        .exact(Method::GET, "/api/auth/me", Operation::Me)
        .build(stages)
}
