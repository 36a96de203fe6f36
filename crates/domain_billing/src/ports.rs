//! Billing Domain Ports
//!
//! The [`BillStore`] trait defines everything the billing ledger needs from
//! its persistence layer. The PostgreSQL adapter lives in `infra_db`; tests
//! run against the in-memory store in `test_utils`.
//!
//! Listings are returned unordered; sorting is a presentation contract
//! applied by the ledger, not a storage requirement.

use async_trait::async_trait;
use rust_decimal::Decimal;

use core_kernel::{BillKey, ConsumerKey, PaymentKey, PortError};

use crate::bill::{Bill, BillStatus};

/// Persistence gateway for bills.
#[async_trait]
pub trait BillStore: Send + Sync {
    /// Inserts or fully overwrites a bill, keyed by its bill key.
    async fn save(&self, bill: &Bill) -> Result<(), PortError>;

    /// Looks a bill up by business key.
    async fn find_by_key(&self, key: &BillKey) -> Result<Option<Bill>, PortError>;

    /// All bills in the system.
    async fn find_all(&self) -> Result<Vec<Bill>, PortError>;

    /// All bills owned by a customer.
    async fn find_by_customer(&self, consumer: &ConsumerKey) -> Result<Vec<Bill>, PortError>;

    /// Bills owned by a customer with the given status.
    async fn find_by_customer_and_status(
        &self,
        consumer: &ConsumerKey,
        status: BillStatus,
    ) -> Result<Vec<Bill>, PortError>;

    /// All bills with the given status.
    async fn find_by_status(&self, status: BillStatus) -> Result<Vec<Bill>, PortError>;

    /// Bills that have seen at least one payment (payment key assigned).
    async fn find_with_payments(&self) -> Result<Vec<Bill>, PortError>;

    /// Bills of one customer that have seen at least one payment.
    async fn find_with_payments_by_customer(
        &self,
        consumer: &ConsumerKey,
    ) -> Result<Vec<Bill>, PortError>;

    /// True if a bill with this key exists.
    async fn exists_by_key(&self, key: &BillKey) -> Result<bool, PortError>;

    /// True if any bill carries this payment key.
    async fn exists_by_payment_key(&self, key: &PaymentKey) -> Result<bool, PortError>;

    /// Removes a bill by key. Absence is not an error at this layer.
    async fn delete(&self, key: &BillKey) -> Result<(), PortError>;

    /// Total number of bills in the system.
    async fn count_all(&self) -> Result<i64, PortError>;

    /// Number of bills with the given status.
    async fn count_by_status(&self, status: BillStatus) -> Result<i64, PortError>;

    /// Sum of the current `amount_due` over bills with the given status.
    async fn sum_amount_by_status(&self, status: BillStatus) -> Result<Decimal, PortError>;
}
