use std::sync::Arc;

use axum::{extract::{rejection::JsonRejection, State}, http::StatusCode, Json};

use service::auth::{domain::{AuthSession, PublicProfile}, AuthService};

use crate::errors::ApiError;
use crate::validation::{LoginRequest, RegisterRequest};

/// Shared handler state. Handlers borrow the service; the pool behind it is owned by startup.
#[derive(Clone)]
pub struct ServerState {
    pub auth: Arc<AuthService>,
}

impl ServerState {
    pub fn new(auth: AuthService) -> Self {
        Self { auth: Arc::new(auth) }
    }
}

#[utoipa::path(
    post, path = "/auth/users", tag = "auth",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created", body = crate::openapi::ProfileDoc),
        (status = 400, description = "Malformed request", body = crate::errors::ErrorBody),
        (status = 409, description = "Email already exists", body = crate::errors::ErrorBody)
    )
)]
pub async fn register(
    State(state): State<ServerState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<PublicProfile>), ApiError> {
    let Json(req) = payload?;
    let input = req.validate()?;
    let profile = state.auth.register(input).await?;
    Ok((StatusCode::CREATED, Json(profile)))
}

#[utoipa::path(
    post, path = "/auth/tokens", tag = "auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Credentials accepted", body = crate::openapi::SessionDoc),
        (status = 400, description = "Malformed request", body = crate::errors::ErrorBody),
        (status = 401, description = "Invalid email or password", body = crate::errors::ErrorBody)
    )
)]
pub async fn login(
    State(state): State<ServerState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<AuthSession>, ApiError> {
    let Json(req) = payload?;
    let input = req.validate()?;
    let session = state.auth.login(input).await?;
    Ok(Json(session))
}
