//! Billing domain errors

use thiserror::Error;

use core_kernel::{KeyAllocationError, PortError};

/// Errors raised by the billing ledger.
///
/// Business rejections (`BillNotFound`, `CustomerNotFound`, `AlreadyPaid`)
/// propagate unmodified to the boundary. Unexpected failures inside a payment
/// application are wrapped once as `PaymentProcessing` so callers can tell an
/// expected rejection from an internal fault.
#[derive(Debug, Error)]
pub enum BillingError {
    /// The consumer key does not resolve to a registered customer
    #[error("Customer not found: {0}")]
    CustomerNotFound(String),

    /// The bill key does not resolve
    #[error("Bill not found: {0}")]
    BillNotFound(String),

    /// Payment rejected: the bill is already settled
    #[error("Bill {0} is already paid")]
    AlreadyPaid(String),

    /// The allocate-check-retry loop exhausted its attempt budget
    #[error(transparent)]
    KeyAllocation(#[from] KeyAllocationError),

    /// Unexpected failure during a payment application
    #[error("Payment processing failed: {0}")]
    PaymentProcessing(String),

    /// Persistence failure outside a payment application
    #[error(transparent)]
    Store(#[from] PortError),
}

impl BillingError {
    /// True for expected business-rule rejections (as opposed to faults).
    pub fn is_business_rejection(&self) -> bool {
        matches!(
            self,
            BillingError::CustomerNotFound(_)
                | BillingError::BillNotFound(_)
                | BillingError::AlreadyPaid(_)
        )
    }
}
