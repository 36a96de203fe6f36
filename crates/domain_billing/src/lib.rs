//! Billing Domain - Bill Lifecycle and Payment Application
//!
//! This crate owns bill records and the payment state machine:
//! creation, partial and full payment application, and the transition to
//! `Paid`. Business keys are allocated through the
//! [`core_kernel::KeyAllocator`] with a collision-retry discipline against
//! the persistence layer.
//!
//! # Lifecycle
//!
//! A bill is created by an explicit issuance request bound to an existing
//! customer, mutated only through full-record update (admin correction) or
//! payment application, and deleted unconditionally by key.
//!
//! # Invariants
//!
//! - `amount_due` never goes negative; overpayments clamp to zero
//! - `status == Paid` iff the latest payment left `amount_due <= 0`
//! - the payment key is assigned exactly once, on the first payment
//!
//! # Example
//!
//! ```rust,ignore
//! use domain_billing::{BillingLedger, IssueBill};
//!
//! let ledger = BillingLedger::new(bills, customers, allocator);
//! let bill = ledger.issue_bill(request).await?;
//! let outcome = ledger.apply_payment(&bill.bill_key, dec!(200)).await?;
//! ```

pub mod bill;
pub mod ledger;
pub mod payment;
pub mod ports;
pub mod error;

pub use bill::{Bill, BillStatus, IssueBill, UpdateBill};
pub use ledger::{BillingLedger, BillStatistics};
pub use payment::{PaymentApplication, PaymentOutcome};
pub use ports::BillStore;
pub use error::BillingError;
