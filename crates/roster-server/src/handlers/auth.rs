use super::parse_json;
use crate::context::RequestContext;
use crate::error::ApiError;
use crate::state::AppState;
use axum::Json;
use axum::body::Bytes;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use roster_auth::AuthError;
use roster_core::{Credential, LoginRequest, RegistrationRequest};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: Credential,
}

pub async fn register(state: &AppState, body: Bytes) -> Result<Response, ApiError> {
    let req: RegistrationRequest = parse_json(&body)?;
    req.validate()?;

    let user = state
        .auth
        .register(
            &req.username,
            &req.email,
            &req.password,
            &req.first_name,
            &req.last_name,
        )
        .await
        .inspect_err(|e| tracing::debug!(reason = %e, "registration rejected"))?;
    let token = state.auth.issue_token(&user)?;

    Ok((StatusCode::CREATED, Json(AuthResponse { token, user })).into_response())
}

pub async fn login(state: &AppState, body: Bytes) -> Result<Response, ApiError> {
    let req: LoginRequest = parse_json(&body)?;
    req.validate()?;

    match state.auth.login(&req.login, &req.password).await {
        Ok((token, user)) => {
            tracing::info!(user_id = %user.id, "login succeeded");
            Ok(Json(AuthResponse { token, user }).into_response())
        }
        Err(e) => {
            tracing::warn!(reason = %e, "login failed");
            Err(e.into())
        }
    }
}

pub async fn me(state: &AppState, ctx: &RequestContext) -> Result<Response, ApiError> {
    let claims = ctx.identity()?;
    match state.auth.current_credential(claims).await {
        Ok(user) => Ok(Json(user).into_response()),
        Err(AuthError::NotFound) => Err(ApiError::NotFound {
            error: "User not found",
            message: format!("no user with id '{}'", claims.sub),
        }),
        Err(AuthError::Disabled) => Err(ApiError::unauthorized("account is disabled")),
        Err(e) => Err(e.into()),
    }
}
