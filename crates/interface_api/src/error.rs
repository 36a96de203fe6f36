//! API error handling
//!
//! Maps the domain error taxonomies onto HTTP statuses: not-found → 404,
//! conflicts → 409, business-rule rejections and validation → 422, bad
//! credentials → 401, everything unexpected → 500.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use core_kernel::PortError;
use domain_billing::BillingError;
use domain_complaints::ComplaintError;
use domain_customers::CustomerError;
use infra_db::DatabaseError;

/// API error types
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Business rule violation: {0}")]
    BusinessRule(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("Database error: {0}")]
    Database(String),
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<String>>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match &self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg.clone()),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg.clone()),
            ApiError::Unauthorized(msg) => {
                (StatusCode::UNAUTHORIZED, "unauthorized", msg.clone())
            }
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, "conflict", msg.clone()),
            ApiError::BusinessRule(msg) => {
                (StatusCode::UNPROCESSABLE_ENTITY, "business_rule", msg.clone())
            }
            ApiError::Validation(msg) => {
                (StatusCode::UNPROCESSABLE_ENTITY, "validation_error", msg.clone())
            }
            ApiError::Internal(msg) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", msg.clone())
            }
            ApiError::Database(msg) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "database_error", msg.clone())
            }
        };

        let body = ErrorResponse {
            error: error_type.to_string(),
            message,
            details: None,
        };

        (status, Json(body)).into_response()
    }
}

impl From<PortError> for ApiError {
    fn from(err: PortError) -> Self {
        match err {
            PortError::NotFound(msg) => ApiError::NotFound(msg),
            PortError::Conflict(msg) => ApiError::Conflict(msg),
            PortError::Storage(msg) => ApiError::Database(msg),
        }
    }
}

impl From<BillingError> for ApiError {
    fn from(err: BillingError) -> Self {
        match err {
            BillingError::CustomerNotFound(_) | BillingError::BillNotFound(_) => {
                ApiError::NotFound(err.to_string())
            }
            BillingError::AlreadyPaid(_) => ApiError::BusinessRule(err.to_string()),
            BillingError::KeyAllocation(_) | BillingError::PaymentProcessing(_) => {
                ApiError::Internal(err.to_string())
            }
            BillingError::Store(port) => port.into(),
        }
    }
}

impl From<ComplaintError> for ApiError {
    fn from(err: ComplaintError) -> Self {
        match err {
            ComplaintError::CustomerNotFound(_) | ComplaintError::ComplaintNotFound(_) => {
                ApiError::NotFound(err.to_string())
            }
            ComplaintError::NotEditable { .. } => ApiError::BusinessRule(err.to_string()),
            ComplaintError::KeyAllocation(_) => ApiError::Internal(err.to_string()),
            ComplaintError::Store(port) => port.into(),
        }
    }
}

impl From<CustomerError> for ApiError {
    fn from(err: CustomerError) -> Self {
        match err {
            CustomerError::EmailAlreadyRegistered(_) | CustomerError::ConsumerKeyTaken(_) => {
                ApiError::Conflict(err.to_string())
            }
            CustomerError::InvalidCredentials | CustomerError::AccountInactive => {
                ApiError::Unauthorized(err.to_string())
            }
            CustomerError::CustomerNotFound(_) | CustomerError::UserNotFound(_) => {
                ApiError::NotFound(err.to_string())
            }
            CustomerError::Store(port) => port.into(),
        }
    }
}

impl From<DatabaseError> for ApiError {
    fn from(err: DatabaseError) -> Self {
        ApiError::Database(err.to_string())
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(err: validator::ValidationErrors) -> Self {
        ApiError::Validation(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn already_paid_maps_to_unprocessable() {
        let err = ApiError::from(BillingError::AlreadyPaid("ebm1".to_string()));
        assert!(matches!(err, ApiError::BusinessRule(_)));
    }

    #[test]
    fn duplicate_email_maps_to_conflict() {
        let err = ApiError::from(CustomerError::EmailAlreadyRegistered(
            "a@example.com".to_string(),
        ));
        assert!(matches!(err, ApiError::Conflict(_)));
    }

    #[test]
    fn bad_credentials_map_to_unauthorized() {
        let err = ApiError::from(CustomerError::InvalidCredentials);
        assert!(matches!(err, ApiError::Unauthorized(_)));
    }

    #[test]
    fn inactive_account_maps_to_unauthorized() {
        let err = ApiError::from(CustomerError::AccountInactive);
        assert!(matches!(err, ApiError::Unauthorized(_)));
    }
}
