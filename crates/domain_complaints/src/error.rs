//! Complaint domain errors

use thiserror::Error;

use core_kernel::{KeyAllocationError, PortError};

use crate::complaint::ComplaintStatus;

/// Errors raised by the complaint desk.
#[derive(Debug, Error)]
pub enum ComplaintError {
    /// The consumer key does not resolve to a registered customer
    #[error("Customer not found: {0}")]
    CustomerNotFound(String),

    /// The complaint key does not resolve
    #[error("No complaint is there for Complaint ID: {0}")]
    ComplaintNotFound(String),

    /// Customer edits and deletes are only allowed while the complaint is open
    #[error("Complaint {key} can no longer be modified (status: {status})")]
    NotEditable {
        key: String,
        status: ComplaintStatus,
    },

    /// The allocate-check-retry loop exhausted its attempt budget
    #[error(transparent)]
    KeyAllocation(#[from] KeyAllocationError),

    /// Persistence failure
    #[error(transparent)]
    Store(#[from] PortError),
}
