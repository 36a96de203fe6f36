//! Bill handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use core_kernel::{BillKey, ConsumerKey};
use domain_billing::BillStatus;

use crate::dto::bills::{
    BillResponse, BillStatsResponse, CreateBillRequest, PayBillRequest, PaymentResponse,
    UpdateBillRequest,
};
use crate::error::ApiError;
use crate::AppState;

/// Issues a new bill (admin)
pub async fn create_bill(
    State(state): State<AppState>,
    Json(request): Json<CreateBillRequest>,
) -> Result<(StatusCode, Json<BillResponse>), ApiError> {
    request.validate()?;
    let bill = state.billing.issue_bill(request.into()).await?;
    Ok((StatusCode::CREATED, Json(bill.into())))
}

/// Lists all bills (admin)
pub async fn list_bills(
    State(state): State<AppState>,
) -> Result<Json<Vec<BillResponse>>, ApiError> {
    let bills = state.billing.list_all().await?;
    Ok(Json(bills.into_iter().map(Into::into).collect()))
}

/// Gets a bill by key
pub async fn get_bill(
    State(state): State<AppState>,
    Path(bill_id): Path<String>,
) -> Result<Json<BillResponse>, ApiError> {
    let bill = state.billing.get_bill(&BillKey::new(bill_id)).await?;
    Ok(Json(bill.into()))
}

/// Full overwrite of a bill's mutable fields (admin)
pub async fn update_bill(
    State(state): State<AppState>,
    Path(bill_id): Path<String>,
    Json(request): Json<UpdateBillRequest>,
) -> Result<Json<BillResponse>, ApiError> {
    request.validate()?;
    let bill = state
        .billing
        .update_bill(&BillKey::new(bill_id), request.into())
        .await?;
    Ok(Json(bill.into()))
}

/// Deletes a bill (admin)
pub async fn delete_bill(
    State(state): State<AppState>,
    Path(bill_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.billing.delete_bill(&BillKey::new(bill_id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Applies a payment to a bill
pub async fn pay_bill(
    State(state): State<AppState>,
    Json(request): Json<PayBillRequest>,
) -> Result<Json<PaymentResponse>, ApiError> {
    request.validate()?;
    let outcome = state
        .billing
        .apply_payment(&BillKey::new(request.bill_id), request.amount)
        .await?;
    Ok(Json(outcome.into()))
}

/// All bills for one customer
pub async fn bills_by_customer(
    State(state): State<AppState>,
    Path(consumer_id): Path<String>,
) -> Result<Json<Vec<BillResponse>>, ApiError> {
    let bills = state
        .billing
        .list_for_customer(&ConsumerKey::new(consumer_id))
        .await?;
    Ok(Json(bills.into_iter().map(Into::into).collect()))
}

/// Pending bills for one customer
pub async fn pending_bills_by_customer(
    State(state): State<AppState>,
    Path(consumer_id): Path<String>,
) -> Result<Json<Vec<BillResponse>>, ApiError> {
    let bills = state
        .billing
        .list_pending_for_customer(&ConsumerKey::new(consumer_id))
        .await?;
    Ok(Json(bills.into_iter().map(Into::into).collect()))
}

/// Paid bills for one customer
pub async fn paid_bills_by_customer(
    State(state): State<AppState>,
    Path(consumer_id): Path<String>,
) -> Result<Json<Vec<BillResponse>>, ApiError> {
    let bills = state
        .billing
        .list_paid_for_customer(&ConsumerKey::new(consumer_id))
        .await?;
    Ok(Json(bills.into_iter().map(Into::into).collect()))
}

/// All bills with the given status (admin)
pub async fn bills_by_status(
    State(state): State<AppState>,
    Path(status): Path<String>,
) -> Result<Json<Vec<BillResponse>>, ApiError> {
    let status = status
        .parse::<BillStatus>()
        .map_err(ApiError::BadRequest)?;
    let bills = state.billing.list_by_status(status).await?;
    Ok(Json(bills.into_iter().map(Into::into).collect()))
}

/// Aggregate bill statistics (admin)
pub async fn bill_stats(
    State(state): State<AppState>,
) -> Result<Json<BillStatsResponse>, ApiError> {
    let stats = state.billing.statistics().await?;
    Ok(Json(stats.into()))
}

/// All bills that have seen a payment (admin)
pub async fn payment_history(
    State(state): State<AppState>,
) -> Result<Json<Vec<BillResponse>>, ApiError> {
    let bills = state.billing.payment_history().await?;
    Ok(Json(bills.into_iter().map(Into::into).collect()))
}

/// One customer's payment history
pub async fn payment_history_by_customer(
    State(state): State<AppState>,
    Path(consumer_id): Path<String>,
) -> Result<Json<Vec<BillResponse>>, ApiError> {
    let bills = state
        .billing
        .payment_history_for_customer(&ConsumerKey::new(consumer_id))
        .await?;
    Ok(Json(bills.into_iter().map(Into::into).collect()))
}
