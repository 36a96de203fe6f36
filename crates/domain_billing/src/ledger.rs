//! The billing ledger
//!
//! Orchestrates bill issuance, listings, payment application, admin
//! corrections, deletion, and statistics over the [`BillStore`] and
//! [`CustomerDirectory`] ports.
//!
//! # Concurrency
//!
//! Payment application is a read-check-write sequence. The ledger serializes
//! it per bill key through a [`KeyedLock`]; operations on distinct bills
//! proceed concurrently. This guarantees that two concurrent payments on the
//! same bill cannot produce an inconsistent `amount_due`/`status` pair or
//! allocate two payment keys.

use chrono::Utc;
use rust_decimal::Decimal;
use std::cmp::Reverse;
use std::sync::Arc;
use tracing::{debug, info};

use core_kernel::{
    BillKey, ConsumerKey, CustomerDirectory, KeyAllocationError, KeyAllocator, KeyedLock,
    PaymentKey, MAX_KEY_ATTEMPTS,
};

use crate::bill::{Bill, BillStatus, IssueBill, UpdateBill};
use crate::error::BillingError;
use crate::payment::PaymentOutcome;
use crate::ports::BillStore;

/// Aggregate counts by status and total paid revenue.
///
/// `total_revenue` sums the *current* `amount_due` over `Paid` bills, which
/// is zero once a bill is fully settled. This mirrors the legacy report and
/// is kept for compatibility.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct BillStatistics {
    pub total_count: i64,
    pub pending_count: i64,
    pub paid_count: i64,
    pub overdue_count: i64,
    pub total_revenue: Decimal,
}

/// The billing subsystem responsible for bill records and payment state
/// transitions.
#[derive(Clone)]
pub struct BillingLedger {
    bills: Arc<dyn BillStore>,
    customers: Arc<dyn CustomerDirectory>,
    allocator: Arc<KeyAllocator>,
    payment_locks: KeyedLock,
}

impl BillingLedger {
    /// Creates a ledger over the given ports.
    pub fn new(
        bills: Arc<dyn BillStore>,
        customers: Arc<dyn CustomerDirectory>,
        allocator: Arc<KeyAllocator>,
    ) -> Self {
        Self {
            bills,
            customers,
            allocator,
            payment_locks: KeyedLock::new(),
        }
    }

    /// Issues a new bill for an existing customer.
    ///
    /// # Errors
    ///
    /// - [`BillingError::CustomerNotFound`] if the consumer key does not resolve
    /// - [`BillingError::KeyAllocation`] if no unused bill key could be found
    pub async fn issue_bill(&self, request: IssueBill) -> Result<Bill, BillingError> {
        if !self.customers.exists(&request.consumer_key).await? {
            return Err(BillingError::CustomerNotFound(
                request.consumer_key.to_string(),
            ));
        }

        let bill_key = self.allocate_bill_key().await?;
        let bill = Bill::issue(bill_key, request, Utc::now().date_naive());
        self.bills.save(&bill).await?;

        info!(bill = %bill.bill_key, consumer = %bill.consumer_key, "bill issued");
        Ok(bill)
    }

    /// All bills, newest issue date first.
    pub async fn list_all(&self) -> Result<Vec<Bill>, BillingError> {
        let mut bills = self.bills.find_all().await?;
        sort_by_issue_date(&mut bills);
        Ok(bills)
    }

    /// All bills for one customer, newest issue date first.
    pub async fn list_for_customer(
        &self,
        consumer: &ConsumerKey,
    ) -> Result<Vec<Bill>, BillingError> {
        let mut bills = self.bills.find_by_customer(consumer).await?;
        sort_by_issue_date(&mut bills);
        Ok(bills)
    }

    /// Pending bills for one customer, newest issue date first.
    pub async fn list_pending_for_customer(
        &self,
        consumer: &ConsumerKey,
    ) -> Result<Vec<Bill>, BillingError> {
        let mut bills = self
            .bills
            .find_by_customer_and_status(consumer, BillStatus::Pending)
            .await?;
        sort_by_issue_date(&mut bills);
        Ok(bills)
    }

    /// Paid bills for one customer, most recent payment first.
    pub async fn list_paid_for_customer(
        &self,
        consumer: &ConsumerKey,
    ) -> Result<Vec<Bill>, BillingError> {
        let mut bills = self
            .bills
            .find_by_customer_and_status(consumer, BillStatus::Paid)
            .await?;
        sort_by_payment_date(&mut bills);
        Ok(bills)
    }

    /// All bills with the given status, newest issue date first.
    pub async fn list_by_status(&self, status: BillStatus) -> Result<Vec<Bill>, BillingError> {
        let mut bills = self.bills.find_by_status(status).await?;
        sort_by_issue_date(&mut bills);
        Ok(bills)
    }

    /// Looks a single bill up by key.
    pub async fn get_bill(&self, key: &BillKey) -> Result<Bill, BillingError> {
        self.bills
            .find_by_key(key)
            .await?
            .ok_or_else(|| BillingError::BillNotFound(key.to_string()))
    }

    /// Applies a payment to a bill.
    ///
    /// Runs inside the per-bill exclusive section. The payment amount is not
    /// validated at this layer. On the first payment of a bill a payment key
    /// is allocated; subsequent payments reuse it.
    ///
    /// # Errors
    ///
    /// - [`BillingError::BillNotFound`] if the key does not resolve
    /// - [`BillingError::AlreadyPaid`] if the bill is already settled
    /// - [`BillingError::PaymentProcessing`] for unexpected store failures
    ///   during the sequence
    pub async fn apply_payment(
        &self,
        key: &BillKey,
        amount: Decimal,
    ) -> Result<PaymentOutcome, BillingError> {
        let _guard = self.payment_locks.acquire(key.as_str()).await;

        let mut bill = self
            .bills
            .find_by_key(key)
            .await
            .map_err(wrap_processing)?
            .ok_or_else(|| BillingError::BillNotFound(key.to_string()))?;

        if bill.status == BillStatus::Paid {
            return Err(BillingError::AlreadyPaid(key.to_string()));
        }

        if bill.payment_key.is_none() {
            bill.payment_key = Some(self.allocate_payment_key().await?);
        }
        // Invariant: set exactly once, right above or on an earlier payment.
        let payment_key = bill
            .payment_key
            .clone()
            .ok_or_else(|| BillingError::PaymentProcessing("payment key missing".to_string()))?;

        let application = bill.apply_payment(amount, Utc::now().date_naive());
        self.bills.save(&bill).await.map_err(wrap_processing)?;

        info!(
            bill = %bill.bill_key,
            payment = %payment_key,
            status = %bill.status,
            remaining = %bill.amount_due,
            "payment applied"
        );

        Ok(PaymentOutcome::from_application(
            application,
            payment_key,
            bill.status,
        ))
    }

    /// Full overwrite of a bill's mutable fields (admin correction).
    pub async fn update_bill(
        &self,
        key: &BillKey,
        update: UpdateBill,
    ) -> Result<Bill, BillingError> {
        let mut bill = self.get_bill(key).await?;

        if !self.customers.exists(&update.consumer_key).await? {
            return Err(BillingError::CustomerNotFound(
                update.consumer_key.to_string(),
            ));
        }

        bill.apply_update(update);
        self.bills.save(&bill).await?;
        info!(bill = %bill.bill_key, "bill updated");
        Ok(bill)
    }

    /// Removes a bill by key, regardless of status.
    pub async fn delete_bill(&self, key: &BillKey) -> Result<(), BillingError> {
        if !self.bills.exists_by_key(key).await? {
            return Err(BillingError::BillNotFound(key.to_string()));
        }
        self.bills.delete(key).await?;
        info!(bill = %key, "bill deleted");
        Ok(())
    }

    /// Aggregate counts by status and total paid revenue.
    pub async fn statistics(&self) -> Result<BillStatistics, BillingError> {
        Ok(BillStatistics {
            total_count: self.bills.count_all().await?,
            pending_count: self.bills.count_by_status(BillStatus::Pending).await?,
            paid_count: self.bills.count_by_status(BillStatus::Paid).await?,
            overdue_count: self.bills.count_by_status(BillStatus::Overdue).await?,
            total_revenue: self.bills.sum_amount_by_status(BillStatus::Paid).await?,
        })
    }

    /// All bills that have seen a payment, most recent payment first.
    pub async fn payment_history(&self) -> Result<Vec<Bill>, BillingError> {
        let mut bills = self.bills.find_with_payments().await?;
        sort_by_payment_date(&mut bills);
        Ok(bills)
    }

    /// One customer's payment history, most recent payment first.
    pub async fn payment_history_for_customer(
        &self,
        consumer: &ConsumerKey,
    ) -> Result<Vec<Bill>, BillingError> {
        let mut bills = self.bills.find_with_payments_by_customer(consumer).await?;
        sort_by_payment_date(&mut bills);
        Ok(bills)
    }

    /// Allocates a bill key, retrying on collision against the store.
    async fn allocate_bill_key(&self) -> Result<BillKey, BillingError> {
        for attempt in 0..MAX_KEY_ATTEMPTS {
            let candidate = self.allocator.next_bill_key();
            if !self.bills.exists_by_key(&candidate).await? {
                return Ok(candidate);
            }
            debug!(key = %candidate, attempt, "bill key collision, retrying");
        }
        Err(KeyAllocationError::new("bill", MAX_KEY_ATTEMPTS).into())
    }

    /// Allocates a payment key, retrying on collision against the store.
    async fn allocate_payment_key(&self) -> Result<PaymentKey, BillingError> {
        for attempt in 0..MAX_KEY_ATTEMPTS {
            let candidate = self.allocator.next_payment_key();
            if !self
                .bills
                .exists_by_payment_key(&candidate)
                .await
                .map_err(wrap_processing)?
            {
                return Ok(candidate);
            }
            debug!(key = %candidate, attempt, "payment key collision, retrying");
        }
        Err(KeyAllocationError::new("payment", MAX_KEY_ATTEMPTS).into())
    }
}

fn wrap_processing(err: core_kernel::PortError) -> BillingError {
    BillingError::PaymentProcessing(err.to_string())
}

fn sort_by_issue_date(bills: &mut [Bill]) {
    bills.sort_by_key(|bill| Reverse(bill.issue_date));
}

fn sort_by_payment_date(bills: &mut [Bill]) {
    bills.sort_by_key(|bill| Reverse(bill.payment_date));
}
