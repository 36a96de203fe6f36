//! Customer handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use core_kernel::ConsumerKey;

use crate::dto::customers::{CustomerResponse, RegisterCustomerRequest, UpdateProfileRequest};
use crate::error::ApiError;
use crate::AppState;

/// Customer self-registration (public)
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterCustomerRequest>,
) -> Result<(StatusCode, Json<CustomerResponse>), ApiError> {
    request.validate()?;
    let customer = state.registration.register_customer(request.into()).await?;
    Ok((StatusCode::CREATED, Json(customer.into())))
}

/// Lists all customers (admin)
pub async fn list_customers(
    State(state): State<AppState>,
) -> Result<Json<Vec<CustomerResponse>>, ApiError> {
    let customers = state.accounts.list_customers().await?;
    Ok(Json(customers.into_iter().map(Into::into).collect()))
}

/// Updates the profile of the customer attached to a login record
pub async fn update_profile(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    Json(request): Json<UpdateProfileRequest>,
) -> Result<Json<CustomerResponse>, ApiError> {
    request.validate()?;
    let customer = state
        .accounts
        .update_profile(user_id, request.into())
        .await?;
    Ok(Json(customer.into()))
}

/// Deletes a customer account by consumer number (admin)
pub async fn delete_customer(
    State(state): State<AppState>,
    Path(consumer_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state
        .accounts
        .delete_customer(&ConsumerKey::new(consumer_id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
