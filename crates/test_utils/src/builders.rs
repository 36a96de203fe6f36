//! Test Data Builders
//!
//! Builder patterns for constructing test data with sensible defaults.
//! Tests specify only the fields they care about.

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use uuid::Uuid;

use core_kernel::{BillKey, ComplaintKey, ConsumerKey, PaymentKey};
use domain_billing::{Bill, BillStatus};
use domain_complaints::{Complaint, ComplaintStatus};
use domain_customers::{AccountStatus, Customer, User, UserRole};

use crate::fixtures;

/// Builder for test bills.
pub struct TestBillBuilder {
    bill_key: BillKey,
    consumer_key: ConsumerKey,
    billing_period: String,
    amount_due: Decimal,
    issue_date: NaiveDate,
    due_date: Option<NaiveDate>,
    status: BillStatus,
    payment_key: Option<PaymentKey>,
    payment_date: Option<NaiveDate>,
}

impl Default for TestBillBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestBillBuilder {
    /// Creates a builder with default values.
    pub fn new() -> Self {
        Self {
            bill_key: BillKey::new("ebm101010100"),
            consumer_key: fixtures::consumer_key(),
            billing_period: "2024-01".to_string(),
            amount_due: dec!(500.00),
            issue_date: fixtures::issue_date(),
            due_date: None,
            status: BillStatus::Pending,
            payment_key: None,
            payment_date: None,
        }
    }

    pub fn with_bill_key(mut self, key: impl Into<BillKey>) -> Self {
        self.bill_key = key.into();
        self
    }

    pub fn with_consumer_key(mut self, key: impl Into<ConsumerKey>) -> Self {
        self.consumer_key = key.into();
        self
    }

    pub fn with_billing_period(mut self, period: impl Into<String>) -> Self {
        self.billing_period = period.into();
        self
    }

    pub fn with_amount_due(mut self, amount: Decimal) -> Self {
        self.amount_due = amount;
        self
    }

    pub fn with_issue_date(mut self, date: NaiveDate) -> Self {
        self.issue_date = date;
        self
    }

    pub fn with_due_date(mut self, date: NaiveDate) -> Self {
        self.due_date = Some(date);
        self
    }

    pub fn with_status(mut self, status: BillStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_payment(mut self, key: impl Into<PaymentKey>, date: NaiveDate) -> Self {
        self.payment_key = Some(key.into());
        self.payment_date = Some(date);
        self
    }

    pub fn build(self) -> Bill {
        let now = Utc::now();
        let due_date = self
            .due_date
            .unwrap_or(self.issue_date + chrono::Days::new(15));
        Bill {
            bill_key: self.bill_key,
            consumer_key: self.consumer_key,
            billing_period: self.billing_period,
            amount_due: self.amount_due,
            issue_date: self.issue_date,
            due_date,
            status: self.status,
            payment_key: self.payment_key,
            payment_date: self.payment_date,
            previous_reading: None,
            current_reading: None,
            units_consumed: None,
            rate_per_unit: None,
            additional_charges: None,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Builder for test complaints.
pub struct TestComplaintBuilder {
    complaint_key: ComplaintKey,
    consumer_key: ConsumerKey,
    kind: String,
    category: String,
    problem: String,
    status: ComplaintStatus,
}

impl Default for TestComplaintBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestComplaintBuilder {
    pub fn new() -> Self {
        Self {
            complaint_key: ComplaintKey::new("ebmc101010500"),
            consumer_key: fixtures::consumer_key(),
            kind: "TECHNICAL".to_string(),
            category: "Meter Issue".to_string(),
            problem: "Meter display is blank".to_string(),
            status: ComplaintStatus::Open,
        }
    }

    pub fn with_complaint_key(mut self, key: impl Into<ComplaintKey>) -> Self {
        self.complaint_key = key.into();
        self
    }

    pub fn with_consumer_key(mut self, key: impl Into<ConsumerKey>) -> Self {
        self.consumer_key = key.into();
        self
    }

    pub fn with_status(mut self, status: ComplaintStatus) -> Self {
        self.status = status;
        self
    }

    pub fn build(self) -> Complaint {
        let now = Utc::now();
        Complaint {
            complaint_key: self.complaint_key,
            consumer_key: self.consumer_key,
            kind: self.kind,
            category: self.category,
            problem: self.problem,
            landmark: None,
            status: self.status,
            admin_response: None,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Builder for test customers (and their login records).
pub struct TestCustomerBuilder {
    consumer_key: ConsumerKey,
    user_id: Uuid,
    name: String,
    email: String,
}

impl Default for TestCustomerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestCustomerBuilder {
    pub fn new() -> Self {
        Self {
            consumer_key: fixtures::consumer_key(),
            user_id: Uuid::new_v4(),
            name: "Meera Devi".to_string(),
            email: "meera@example.com".to_string(),
        }
    }

    pub fn with_consumer_key(mut self, key: impl Into<ConsumerKey>) -> Self {
        self.consumer_key = key.into();
        self
    }

    pub fn with_user_id(mut self, id: Uuid) -> Self {
        self.user_id = id;
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }

    pub fn build(self) -> Customer {
        let now = Utc::now();
        Customer {
            consumer_key: self.consumer_key,
            user_id: self.user_id,
            name: self.name,
            email: self.email,
            mobile: "9876543210".to_string(),
            address: "12 Power Colony".to_string(),
            city: "Jaipur".to_string(),
            state: "Rajasthan".to_string(),
            pincode: "302001".to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Builds a matching login record for this customer.
    pub fn build_user(&self, password: impl Into<String>) -> User {
        User {
            id: self.user_id,
            username: self.name.to_lowercase().replace(' ', "."),
            email: self.email.clone(),
            password: password.into(),
            role: UserRole::Customer,
            status: AccountStatus::Active,
            department: None,
            created_at: Utc::now(),
        }
    }
}
