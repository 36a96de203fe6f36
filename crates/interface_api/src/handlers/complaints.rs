//! Complaint handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use validator::Validate;

use core_kernel::{ComplaintKey, ConsumerKey};
use domain_complaints::ComplaintStatus;

use crate::dto::complaints::{
    ComplaintResponse, CreateComplaintRequest, UpdateComplaintRequest,
    UpdateComplaintStatusRequest,
};
use crate::error::ApiError;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct ComplaintFilter {
    pub status: Option<String>,
}

/// Files a new complaint
pub async fn create_complaint(
    State(state): State<AppState>,
    Json(request): Json<CreateComplaintRequest>,
) -> Result<(StatusCode, Json<ComplaintResponse>), ApiError> {
    request.validate()?;
    let complaint = state.complaints.file_complaint(request.into()).await?;
    Ok((StatusCode::CREATED, Json(complaint.into())))
}

/// Lists all complaints (admin)
pub async fn list_complaints(
    State(state): State<AppState>,
) -> Result<Json<Vec<ComplaintResponse>>, ApiError> {
    let complaints = state.complaints.list_all().await?;
    Ok(Json(complaints.into_iter().map(Into::into).collect()))
}

/// One customer's complaints, optionally filtered by status
pub async fn complaints_by_customer(
    State(state): State<AppState>,
    Path(consumer_id): Path<String>,
    Query(filter): Query<ComplaintFilter>,
) -> Result<Json<Vec<ComplaintResponse>>, ApiError> {
    let consumer = ConsumerKey::new(consumer_id);
    let complaints = match filter.status {
        Some(status) => {
            let status = status
                .parse::<ComplaintStatus>()
                .map_err(ApiError::BadRequest)?;
            state
                .complaints
                .list_for_customer_by_status(&consumer, status)
                .await?
        }
        None => state.complaints.list_for_customer(&consumer).await?,
    };
    Ok(Json(complaints.into_iter().map(Into::into).collect()))
}

/// Gets a complaint by key
pub async fn get_complaint(
    State(state): State<AppState>,
    Path(complaint_id): Path<String>,
) -> Result<Json<ComplaintResponse>, ApiError> {
    let complaint = state
        .complaints
        .get_complaint(&ComplaintKey::new(complaint_id))
        .await?;
    Ok(Json(complaint.into()))
}

/// Customer edit of an open complaint
pub async fn update_complaint(
    State(state): State<AppState>,
    Path(complaint_id): Path<String>,
    Json(request): Json<UpdateComplaintRequest>,
) -> Result<Json<ComplaintResponse>, ApiError> {
    request.validate()?;
    let complaint = state
        .complaints
        .edit_complaint(&ComplaintKey::new(complaint_id), request.into())
        .await?;
    Ok(Json(complaint.into()))
}

/// Customer withdrawal of an open complaint
pub async fn delete_complaint(
    State(state): State<AppState>,
    Path(complaint_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state
        .complaints
        .withdraw_complaint(&ComplaintKey::new(complaint_id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Admin status update, optionally recording a response
pub async fn update_complaint_status(
    State(state): State<AppState>,
    Path(complaint_id): Path<String>,
    Json(request): Json<UpdateComplaintStatusRequest>,
) -> Result<Json<ComplaintResponse>, ApiError> {
    let status = request
        .status
        .parse::<ComplaintStatus>()
        .map_err(ApiError::BadRequest)?;
    let complaint = state
        .complaints
        .update_status(
            &ComplaintKey::new(complaint_id),
            status,
            request.admin_response,
        )
        .await?;
    Ok(Json(complaint.into()))
}
