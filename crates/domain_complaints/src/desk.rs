//! The complaint desk
//!
//! Orchestrates complaint filing, listing, status-gated customer edits and
//! withdrawals, and admin triage over the [`ComplaintStore`] and
//! [`CustomerDirectory`] ports.

use std::cmp::Reverse;
use std::sync::Arc;
use tracing::{debug, info};

use core_kernel::{
    ComplaintKey, ConsumerKey, CustomerDirectory, KeyAllocationError, KeyAllocator,
    MAX_KEY_ATTEMPTS,
};

use crate::complaint::{Complaint, ComplaintStatus, EditComplaint, FileComplaint};
use crate::error::ComplaintError;
use crate::ports::ComplaintStore;

/// Service handling the complaint lifecycle.
#[derive(Clone)]
pub struct ComplaintDesk {
    complaints: Arc<dyn ComplaintStore>,
    customers: Arc<dyn CustomerDirectory>,
    allocator: Arc<KeyAllocator>,
}

impl ComplaintDesk {
    /// Creates a desk over the given ports.
    pub fn new(
        complaints: Arc<dyn ComplaintStore>,
        customers: Arc<dyn CustomerDirectory>,
        allocator: Arc<KeyAllocator>,
    ) -> Self {
        Self {
            complaints,
            customers,
            allocator,
        }
    }

    /// Files a new complaint for an existing customer.
    pub async fn file_complaint(
        &self,
        request: FileComplaint,
    ) -> Result<Complaint, ComplaintError> {
        if !self.customers.exists(&request.consumer_key).await? {
            return Err(ComplaintError::CustomerNotFound(
                request.consumer_key.to_string(),
            ));
        }

        let key = self.allocate_key().await?;
        let complaint = Complaint::file(key, request);
        self.complaints.save(&complaint).await?;

        info!(complaint = %complaint.complaint_key, consumer = %complaint.consumer_key, "complaint filed");
        Ok(complaint)
    }

    /// All complaints, newest first.
    pub async fn list_all(&self) -> Result<Vec<Complaint>, ComplaintError> {
        let mut complaints = self.complaints.find_all().await?;
        sort_newest_first(&mut complaints);
        Ok(complaints)
    }

    /// One customer's complaints, newest first.
    pub async fn list_for_customer(
        &self,
        consumer: &ConsumerKey,
    ) -> Result<Vec<Complaint>, ComplaintError> {
        let mut complaints = self.complaints.find_by_customer(consumer).await?;
        sort_newest_first(&mut complaints);
        Ok(complaints)
    }

    /// One customer's complaints with the given status, newest first.
    pub async fn list_for_customer_by_status(
        &self,
        consumer: &ConsumerKey,
        status: ComplaintStatus,
    ) -> Result<Vec<Complaint>, ComplaintError> {
        let mut complaints = self
            .complaints
            .find_by_customer_and_status(consumer, status)
            .await?;
        sort_newest_first(&mut complaints);
        Ok(complaints)
    }

    /// Looks a complaint up by key.
    pub async fn get_complaint(&self, key: &ComplaintKey) -> Result<Complaint, ComplaintError> {
        self.complaints
            .find_by_key(key)
            .await?
            .ok_or_else(|| ComplaintError::ComplaintNotFound(key.to_string()))
    }

    /// Customer edit of a complaint; allowed only while it is still open.
    pub async fn edit_complaint(
        &self,
        key: &ComplaintKey,
        edit: EditComplaint,
    ) -> Result<Complaint, ComplaintError> {
        let mut complaint = self.get_complaint(key).await?;
        if !complaint.is_editable() {
            return Err(ComplaintError::NotEditable {
                key: key.to_string(),
                status: complaint.status,
            });
        }

        complaint.apply_edit(edit);
        self.complaints.save(&complaint).await?;
        Ok(complaint)
    }

    /// Customer withdrawal of a complaint; allowed only while it is open.
    pub async fn withdraw_complaint(&self, key: &ComplaintKey) -> Result<(), ComplaintError> {
        let complaint = self.get_complaint(key).await?;
        if !complaint.is_editable() {
            return Err(ComplaintError::NotEditable {
                key: key.to_string(),
                status: complaint.status,
            });
        }

        self.complaints.delete(key).await?;
        info!(complaint = %key, "complaint withdrawn");
        Ok(())
    }

    /// Admin status update, optionally recording a response message.
    pub async fn update_status(
        &self,
        key: &ComplaintKey,
        status: ComplaintStatus,
        admin_response: Option<String>,
    ) -> Result<Complaint, ComplaintError> {
        let mut complaint = self.get_complaint(key).await?;
        complaint.transition(status, admin_response);
        self.complaints.save(&complaint).await?;

        info!(complaint = %key, status = %complaint.status, "complaint status updated");
        Ok(complaint)
    }

    /// Allocates a complaint key, retrying on collision against the store.
    async fn allocate_key(&self) -> Result<ComplaintKey, ComplaintError> {
        for attempt in 0..MAX_KEY_ATTEMPTS {
            let candidate = self.allocator.next_complaint_key();
            if !self.complaints.exists_by_key(&candidate).await? {
                return Ok(candidate);
            }
            debug!(key = %candidate, attempt, "complaint key collision, retrying");
        }
        Err(KeyAllocationError::new("complaint", MAX_KEY_ATTEMPTS).into())
    }
}

fn sort_newest_first(complaints: &mut [Complaint]) {
    complaints.sort_by_key(|complaint| Reverse(complaint.created_at));
}
