//! In-memory port implementations
//!
//! These stores back the domain test suites without a database. They honor
//! the same contracts as the PostgreSQL adapters in `infra_db`, including
//! "save is an upsert keyed by business key" and "listings are unordered".
//!
//! `MemoryBillStore` can be switched into a failing mode to exercise the
//! ledger's processing-failure wrapping.

use async_trait::async_trait;
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::RwLock;
use uuid::Uuid;

use core_kernel::{
    BillKey, ComplaintKey, ConsumerKey, CustomerDirectory, PaymentKey, PortError,
};
use domain_billing::{Bill, BillStatus, BillStore};
use domain_complaints::{Complaint, ComplaintStatus, ComplaintStore};
use domain_customers::{Customer, CustomerStore, User, UserStore};

/// In-memory [`BillStore`].
#[derive(Debug, Default)]
pub struct MemoryBillStore {
    bills: RwLock<HashMap<BillKey, Bill>>,
    fail_saves: AtomicBool,
}

impl MemoryBillStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// When set, every subsequent `save` fails with a storage error.
    pub fn set_fail_saves(&self, fail: bool) {
        self.fail_saves.store(fail, Ordering::SeqCst);
    }

    /// Direct snapshot of a stored bill, bypassing the port.
    pub async fn snapshot(&self, key: &BillKey) -> Option<Bill> {
        self.bills.read().await.get(key).cloned()
    }

    /// Seeds a bill directly, bypassing the port.
    pub async fn seed(&self, bill: Bill) {
        self.bills.write().await.insert(bill.bill_key.clone(), bill);
    }
}

#[async_trait]
impl BillStore for MemoryBillStore {
    async fn save(&self, bill: &Bill) -> Result<(), PortError> {
        if self.fail_saves.load(Ordering::SeqCst) {
            return Err(PortError::storage("simulated save failure"));
        }
        self.bills
            .write()
            .await
            .insert(bill.bill_key.clone(), bill.clone());
        Ok(())
    }

    async fn find_by_key(&self, key: &BillKey) -> Result<Option<Bill>, PortError> {
        Ok(self.bills.read().await.get(key).cloned())
    }

    async fn find_all(&self) -> Result<Vec<Bill>, PortError> {
        Ok(self.bills.read().await.values().cloned().collect())
    }

    async fn find_by_customer(&self, consumer: &ConsumerKey) -> Result<Vec<Bill>, PortError> {
        Ok(self
            .bills
            .read()
            .await
            .values()
            .filter(|bill| &bill.consumer_key == consumer)
            .cloned()
            .collect())
    }

    async fn find_by_customer_and_status(
        &self,
        consumer: &ConsumerKey,
        status: BillStatus,
    ) -> Result<Vec<Bill>, PortError> {
        Ok(self
            .bills
            .read()
            .await
            .values()
            .filter(|bill| &bill.consumer_key == consumer && bill.status == status)
            .cloned()
            .collect())
    }

    async fn find_by_status(&self, status: BillStatus) -> Result<Vec<Bill>, PortError> {
        Ok(self
            .bills
            .read()
            .await
            .values()
            .filter(|bill| bill.status == status)
            .cloned()
            .collect())
    }

    async fn find_with_payments(&self) -> Result<Vec<Bill>, PortError> {
        Ok(self
            .bills
            .read()
            .await
            .values()
            .filter(|bill| bill.payment_key.is_some())
            .cloned()
            .collect())
    }

    async fn find_with_payments_by_customer(
        &self,
        consumer: &ConsumerKey,
    ) -> Result<Vec<Bill>, PortError> {
        Ok(self
            .bills
            .read()
            .await
            .values()
            .filter(|bill| &bill.consumer_key == consumer && bill.payment_key.is_some())
            .cloned()
            .collect())
    }

    async fn exists_by_key(&self, key: &BillKey) -> Result<bool, PortError> {
        Ok(self.bills.read().await.contains_key(key))
    }

    async fn exists_by_payment_key(&self, key: &PaymentKey) -> Result<bool, PortError> {
        Ok(self
            .bills
            .read()
            .await
            .values()
            .any(|bill| bill.payment_key.as_ref() == Some(key)))
    }

    async fn delete(&self, key: &BillKey) -> Result<(), PortError> {
        self.bills.write().await.remove(key);
        Ok(())
    }

    async fn count_all(&self) -> Result<i64, PortError> {
        Ok(self.bills.read().await.len() as i64)
    }

    async fn count_by_status(&self, status: BillStatus) -> Result<i64, PortError> {
        Ok(self
            .bills
            .read()
            .await
            .values()
            .filter(|bill| bill.status == status)
            .count() as i64)
    }

    async fn sum_amount_by_status(&self, status: BillStatus) -> Result<Decimal, PortError> {
        Ok(self
            .bills
            .read()
            .await
            .values()
            .filter(|bill| bill.status == status)
            .map(|bill| bill.amount_due)
            .sum())
    }
}

/// In-memory [`CustomerDirectory`] holding a bare set of consumer keys.
#[derive(Debug, Default)]
pub struct MemoryCustomerDirectory {
    keys: RwLock<Vec<ConsumerKey>>,
}

impl MemoryCustomerDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a consumer key as known.
    pub async fn register(&self, consumer: ConsumerKey) {
        self.keys.write().await.push(consumer);
    }
}

#[async_trait]
impl CustomerDirectory for MemoryCustomerDirectory {
    async fn exists(&self, consumer: &ConsumerKey) -> Result<bool, PortError> {
        Ok(self.keys.read().await.contains(consumer))
    }
}

/// In-memory [`ComplaintStore`].
#[derive(Debug, Default)]
pub struct MemoryComplaintStore {
    complaints: RwLock<HashMap<ComplaintKey, Complaint>>,
}

impl MemoryComplaintStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ComplaintStore for MemoryComplaintStore {
    async fn save(&self, complaint: &Complaint) -> Result<(), PortError> {
        self.complaints
            .write()
            .await
            .insert(complaint.complaint_key.clone(), complaint.clone());
        Ok(())
    }

    async fn find_by_key(&self, key: &ComplaintKey) -> Result<Option<Complaint>, PortError> {
        Ok(self.complaints.read().await.get(key).cloned())
    }

    async fn find_all(&self) -> Result<Vec<Complaint>, PortError> {
        Ok(self.complaints.read().await.values().cloned().collect())
    }

    async fn find_by_customer(
        &self,
        consumer: &ConsumerKey,
    ) -> Result<Vec<Complaint>, PortError> {
        Ok(self
            .complaints
            .read()
            .await
            .values()
            .filter(|complaint| &complaint.consumer_key == consumer)
            .cloned()
            .collect())
    }

    async fn find_by_customer_and_status(
        &self,
        consumer: &ConsumerKey,
        status: ComplaintStatus,
    ) -> Result<Vec<Complaint>, PortError> {
        Ok(self
            .complaints
            .read()
            .await
            .values()
            .filter(|complaint| {
                &complaint.consumer_key == consumer && complaint.status == status
            })
            .cloned()
            .collect())
    }

    async fn exists_by_key(&self, key: &ComplaintKey) -> Result<bool, PortError> {
        Ok(self.complaints.read().await.contains_key(key))
    }

    async fn delete(&self, key: &ComplaintKey) -> Result<(), PortError> {
        self.complaints.write().await.remove(key);
        Ok(())
    }
}

/// In-memory [`UserStore`].
#[derive(Debug, Default)]
pub struct MemoryUserStore {
    users: RwLock<HashMap<Uuid, User>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn save(&self, user: &User) -> Result<(), PortError> {
        self.users.write().await.insert(user.id, user.clone());
        Ok(())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, PortError> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|user| user.username == username)
            .cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, PortError> {
        Ok(self.users.read().await.get(&id).cloned())
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, PortError> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .any(|user| user.email == email))
    }
}

/// In-memory [`CustomerStore`], also usable as a [`CustomerDirectory`].
#[derive(Debug, Default)]
pub struct MemoryCustomerStore {
    customers: RwLock<HashMap<ConsumerKey, Customer>>,
}

impl MemoryCustomerStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CustomerStore for MemoryCustomerStore {
    async fn save(&self, customer: &Customer) -> Result<(), PortError> {
        self.customers
            .write()
            .await
            .insert(customer.consumer_key.clone(), customer.clone());
        Ok(())
    }

    async fn find_all(&self) -> Result<Vec<Customer>, PortError> {
        Ok(self.customers.read().await.values().cloned().collect())
    }

    async fn find_by_consumer_key(
        &self,
        consumer: &ConsumerKey,
    ) -> Result<Option<Customer>, PortError> {
        Ok(self.customers.read().await.get(consumer).cloned())
    }

    async fn find_by_user_id(&self, user_id: Uuid) -> Result<Option<Customer>, PortError> {
        Ok(self
            .customers
            .read()
            .await
            .values()
            .find(|customer| customer.user_id == user_id)
            .cloned())
    }

    async fn exists_by_consumer_key(&self, consumer: &ConsumerKey) -> Result<bool, PortError> {
        Ok(self.customers.read().await.contains_key(consumer))
    }

    async fn delete(&self, consumer: &ConsumerKey) -> Result<(), PortError> {
        self.customers.write().await.remove(consumer);
        Ok(())
    }
}

#[async_trait]
impl CustomerDirectory for MemoryCustomerStore {
    async fn exists(&self, consumer: &ConsumerKey) -> Result<bool, PortError> {
        Ok(self.customers.read().await.contains_key(consumer))
    }
}
