//! Authentication handlers

use axum::{extract::State, http::StatusCode, Json};
use validator::Validate;

use crate::auth::create_token;
use crate::dto::auth::{AdminResponse, LoginRequest, LoginResponse, RegisterAdminRequest};
use crate::error::ApiError;
use crate::AppState;

/// Verifies credentials and mints a session token
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    request.validate()?;
    let outcome = state
        .login
        .login(&request.username, &request.password)
        .await?;

    let token = create_token(
        &outcome.user_id.to_string(),
        &outcome.username,
        outcome.role,
        &state.config.jwt_secret,
        state.config.jwt_expiration_secs,
    )
    .map_err(|e| ApiError::Internal(e.to_string()))?;

    Ok(Json(LoginResponse {
        message: outcome.message,
        username: outcome.username,
        user_type: outcome.role.as_str().to_string(),
        user_id: outcome.user_id,
        token,
    }))
}

/// Registers an admin login record (public)
pub async fn register_admin(
    State(state): State<AppState>,
    Json(request): Json<RegisterAdminRequest>,
) -> Result<(StatusCode, Json<AdminResponse>), ApiError> {
    request.validate()?;
    let admin = state.registration.register_admin(request.into()).await?;
    Ok((StatusCode::CREATED, Json(admin.into())))
}
