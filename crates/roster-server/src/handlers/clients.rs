//! Client record operations. All of them sit behind the bearer step.

use super::parse_json;
use crate::context::RequestContext;
use crate::error::ApiError;
use crate::state::AppState;
use axum::Json;
use axum::body::Bytes;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use chrono::Utc;
use roster_core::{Client, ClientStatus, NewClient};
use roster_store::StoreError;
use uuid::Uuid;

pub async fn list(state: &AppState) -> Result<Response, ApiError> {
    let clients = state.clients.list().await?;
    Ok(Json(clients).into_response())
}

pub async fn active(state: &AppState) -> Result<Response, ApiError> {
    let clients = state.clients.list_by_status(ClientStatus::Active).await?;
    Ok(Json(clients).into_response())
}

pub async fn inactive(state: &AppState) -> Result<Response, ApiError> {
    let clients = state.clients.list_by_status(ClientStatus::Inactive).await?;
    Ok(Json(clients).into_response())
}

pub async fn by_id(state: &AppState, ctx: &RequestContext) -> Result<Response, ApiError> {
    let id = ctx.id()?;
    match state.clients.get(id).await {
        Ok(client) => Ok(Json(client).into_response()),
        Err(StoreError::NotFound { .. }) => Err(ApiError::NotFound {
            error: "Client not found",
            message: format!("client '{id}' not found"),
        }),
        Err(e) => Err(e.into()),
    }
}

pub async fn create(state: &AppState, body: Bytes) -> Result<Response, ApiError> {
    let req: NewClient = parse_json(&body)?;
    req.validate()?;

    let now = Utc::now();
    let client = Client {
        id: Uuid::new_v4().to_string(),
        first_name: req.first_name,
        last_name: req.last_name,
        email: req.email,
        phone: req.phone,
        date_of_birth: req.date_of_birth,
        address: req.address,
        emergency_contact_name: req.emergency_contact_name,
        emergency_contact_phone: req.emergency_contact_phone,
        status: req.status.unwrap_or_default(),
        created_at: now,
        updated_at: now,
    };
    state.clients.put(&client).await?;

    tracing::info!(client_id = %client.id, "created client");
    Ok((StatusCode::CREATED, Json(client)).into_response())
}
