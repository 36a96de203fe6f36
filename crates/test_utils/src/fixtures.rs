//! Pre-built Test Fixtures
//!
//! Ready-to-use test data shared across the billing system test suites.
//! Fixtures are consistent and predictable so assertions can use literals.

use chrono::NaiveDate;

use core_kernel::ConsumerKey;

/// The consumer key used by default across builders.
pub fn consumer_key() -> ConsumerKey {
    ConsumerKey::new("CON-1001")
}

/// A second consumer key for cross-customer isolation tests.
pub fn other_consumer_key() -> ConsumerKey {
    ConsumerKey::new("CON-2002")
}

/// Default issue date used by the bill builder.
pub fn issue_date() -> NaiveDate {
    // Mid-month date far from month boundaries.
    NaiveDate::from_ymd_opt(2024, 1, 15).expect("valid date")
}

/// A billing period matching [`issue_date`].
pub fn billing_period() -> String {
    "2024-01".to_string()
}
