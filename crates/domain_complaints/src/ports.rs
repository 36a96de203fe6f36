//! Complaint Domain Ports

use async_trait::async_trait;

use core_kernel::{ComplaintKey, ConsumerKey, PortError};

use crate::complaint::{Complaint, ComplaintStatus};

/// Persistence gateway for complaints.
#[async_trait]
pub trait ComplaintStore: Send + Sync {
    /// Inserts or fully overwrites a complaint, keyed by its complaint key.
    async fn save(&self, complaint: &Complaint) -> Result<(), PortError>;

    /// Looks a complaint up by business key.
    async fn find_by_key(&self, key: &ComplaintKey) -> Result<Option<Complaint>, PortError>;

    /// All complaints in the system.
    async fn find_all(&self) -> Result<Vec<Complaint>, PortError>;

    /// All complaints filed by one customer.
    async fn find_by_customer(&self, consumer: &ConsumerKey) -> Result<Vec<Complaint>, PortError>;

    /// Complaints of one customer with the given status.
    async fn find_by_customer_and_status(
        &self,
        consumer: &ConsumerKey,
        status: ComplaintStatus,
    ) -> Result<Vec<Complaint>, PortError>;

    /// True if a complaint with this key exists.
    async fn exists_by_key(&self, key: &ComplaintKey) -> Result<bool, PortError>;

    /// Removes a complaint by key. Absence is not an error at this layer.
    async fn delete(&self, key: &ComplaintKey) -> Result<(), PortError>;
}
