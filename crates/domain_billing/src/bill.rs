//! The bill aggregate
//!
//! A bill is owned by exactly one customer and moves from `Pending` to `Paid`
//! through one or more payment applications. The arithmetic of a payment
//! lives here as pure functions; orchestration (key allocation, persistence,
//! locking) lives in [`crate::ledger`].

use chrono::{DateTime, Days, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use core_kernel::{BillKey, ConsumerKey, PaymentKey};

use crate::payment::PaymentApplication;

/// Days between issue date and the defaulted due date.
pub const DEFAULT_DUE_DAYS: u64 = 15;

/// Bill lifecycle status.
///
/// `Overdue` is part of the status vocabulary (statistics count it) but no
/// code path currently writes it; there is no overdue-sweep job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BillStatus {
    Pending,
    Paid,
    Overdue,
}

impl BillStatus {
    /// Wire representation, matching the JSON and database encoding.
    pub fn as_str(&self) -> &'static str {
        match self {
            BillStatus::Pending => "PENDING",
            BillStatus::Paid => "PAID",
            BillStatus::Overdue => "OVERDUE",
        }
    }
}

impl fmt::Display for BillStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BillStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "PENDING" => Ok(BillStatus::Pending),
            "PAID" => Ok(BillStatus::Paid),
            "OVERDUE" => Ok(BillStatus::Overdue),
            other => Err(format!("unknown bill status: {other}")),
        }
    }
}

/// An electricity bill.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bill {
    /// Business key, immutable once assigned
    pub bill_key: BillKey,
    /// Owning customer's consumer number
    pub consumer_key: ConsumerKey,
    /// Year-month token, e.g. "2024-01"
    pub billing_period: String,
    /// Remaining balance; never negative
    pub amount_due: Decimal,
    /// Date the bill was issued
    pub issue_date: NaiveDate,
    /// Payment deadline
    pub due_date: NaiveDate,
    /// Lifecycle status
    pub status: BillStatus,
    /// Assigned on the first payment application, stable afterwards
    pub payment_key: Option<PaymentKey>,
    /// Refreshed on every payment application, partial or full
    pub payment_date: Option<NaiveDate>,
    /// Meter reading at the start of the period
    pub previous_reading: Option<i64>,
    /// Meter reading at the end of the period
    pub current_reading: Option<i64>,
    /// Units consumed during the period
    pub units_consumed: Option<i64>,
    /// Tariff applied per unit
    pub rate_per_unit: Option<Decimal>,
    /// Surcharges, arrears, or other extra charges
    pub additional_charges: Option<Decimal>,
    /// Record creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last mutation timestamp
    pub updated_at: DateTime<Utc>,
}

/// Issuance request for a new bill.
#[derive(Debug, Clone)]
pub struct IssueBill {
    pub consumer_key: ConsumerKey,
    pub billing_period: String,
    pub amount_due: Decimal,
    pub issue_date: Option<NaiveDate>,
    pub due_date: Option<NaiveDate>,
    pub previous_reading: Option<i64>,
    pub current_reading: Option<i64>,
    pub units_consumed: Option<i64>,
    pub rate_per_unit: Option<Decimal>,
    pub additional_charges: Option<Decimal>,
}

/// Admin correction: full overwrite of a bill's mutable fields.
///
/// No status-transition validation is applied; this bypasses the payment
/// state machine as an administrative escape hatch.
#[derive(Debug, Clone)]
pub struct UpdateBill {
    pub consumer_key: ConsumerKey,
    pub billing_period: String,
    pub amount_due: Decimal,
    pub issue_date: NaiveDate,
    pub due_date: NaiveDate,
    pub previous_reading: Option<i64>,
    pub current_reading: Option<i64>,
    pub units_consumed: Option<i64>,
    pub rate_per_unit: Option<Decimal>,
    pub additional_charges: Option<Decimal>,
}

impl Bill {
    /// Creates a bill from an issuance request and an allocated key.
    ///
    /// `issue_date` defaults to `today`; `due_date` defaults to
    /// `issue_date + 15 days`.
    pub fn issue(bill_key: BillKey, request: IssueBill, today: NaiveDate) -> Self {
        let issue_date = request.issue_date.unwrap_or(today);
        let due_date = request
            .due_date
            .unwrap_or_else(|| issue_date + Days::new(DEFAULT_DUE_DAYS));
        let now = Utc::now();

        Self {
            bill_key,
            consumer_key: request.consumer_key,
            billing_period: request.billing_period,
            amount_due: request.amount_due,
            issue_date,
            due_date,
            status: BillStatus::Pending,
            payment_key: None,
            payment_date: None,
            previous_reading: request.previous_reading,
            current_reading: request.current_reading,
            units_consumed: request.units_consumed,
            rate_per_unit: request.rate_per_unit,
            additional_charges: request.additional_charges,
            created_at: now,
            updated_at: now,
        }
    }

    /// Applies a payment amount to this bill.
    ///
    /// The caller must have verified the bill is not already `Paid` and must
    /// hold the per-bill exclusive section. The remaining balance clamps at
    /// zero; `payment_date` is refreshed unconditionally.
    pub fn apply_payment(&mut self, amount: Decimal, today: NaiveDate) -> PaymentApplication {
        let remaining = self.amount_due - amount;
        self.amount_due = remaining.max(Decimal::ZERO);
        self.payment_date = Some(today);
        self.updated_at = Utc::now();

        if remaining <= Decimal::ZERO {
            self.status = BillStatus::Paid;
            PaymentApplication::FullyPaid
        } else {
            self.status = BillStatus::Pending;
            PaymentApplication::Partial { remaining }
        }
    }

    /// Overwrites the mutable fields from an admin correction.
    pub fn apply_update(&mut self, update: UpdateBill) {
        self.consumer_key = update.consumer_key;
        self.billing_period = update.billing_period;
        self.amount_due = update.amount_due;
        self.issue_date = update.issue_date;
        self.due_date = update.due_date;
        self.previous_reading = update.previous_reading;
        self.current_reading = update.current_reading;
        self.units_consumed = update.units_consumed;
        self.rate_per_unit = update.rate_per_unit;
        self.additional_charges = update.additional_charges;
        self.updated_at = Utc::now();
    }
}
