//! Business-key allocation
//!
//! The allocator produces identifiers with a fixed prefix, the wall-clock
//! time of allocation (`HHMMSS`), and a per-category monotonically increasing
//! in-process counter. The scheme is deliberately *not* globally unique: two
//! processes, or two calls within the same second against pre-existing data,
//! can collide. Callers must check the produced key for existence against the
//! persistence layer and retry, giving up after [`MAX_KEY_ATTEMPTS`].
//!
//! The allocator is an explicit, injectable object rather than a set of
//! global counters, so tests can control and reset sequence state.

use chrono::Utc;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::keys::{BillKey, ComplaintKey, PaymentKey};

/// Upper bound on allocate-check-retry loops before the request fails.
pub const MAX_KEY_ATTEMPTS: usize = 32;

/// Produces business keys for bills, payments, and complaints.
///
/// Each category keeps its own counter so allocation rates in one category
/// don't starve another.
///
/// # Example
///
/// ```rust
/// use core_kernel::KeyAllocator;
///
/// let allocator = KeyAllocator::new();
/// let key = allocator.next_bill_key();
/// assert!(key.as_str().starts_with("ebm"));
/// ```
#[derive(Debug)]
pub struct KeyAllocator {
    bill_counter: AtomicU64,
    payment_counter: AtomicU64,
    complaint_counter: AtomicU64,
}

impl KeyAllocator {
    /// Prefix for bill keys
    pub const BILL_PREFIX: &'static str = "ebm";
    /// Prefix for payment keys
    pub const PAYMENT_PREFIX: &'static str = "ebmp";
    /// Prefix for complaint keys
    pub const COMPLAINT_PREFIX: &'static str = "ebmc";

    /// Creates an allocator with the standard counter seeds
    /// (100 for bills, 500 for payments and complaints).
    pub fn new() -> Self {
        Self::with_counters(100, 500, 500)
    }

    /// Creates an allocator with explicit counter seeds.
    ///
    /// Primarily useful in tests that need deterministic sequences.
    pub fn with_counters(bill: u64, payment: u64, complaint: u64) -> Self {
        Self {
            bill_counter: AtomicU64::new(bill),
            payment_counter: AtomicU64::new(payment),
            complaint_counter: AtomicU64::new(complaint),
        }
    }

    /// Allocates the next bill key, e.g. `ebm143022100`.
    pub fn next_bill_key(&self) -> BillKey {
        BillKey::new(self.compose(Self::BILL_PREFIX, &self.bill_counter))
    }

    /// Allocates the next payment key, e.g. `ebmp143022500`.
    pub fn next_payment_key(&self) -> PaymentKey {
        PaymentKey::new(self.compose(Self::PAYMENT_PREFIX, &self.payment_counter))
    }

    /// Allocates the next complaint key, e.g. `ebmc143022500`.
    pub fn next_complaint_key(&self) -> ComplaintKey {
        ComplaintKey::new(self.compose(Self::COMPLAINT_PREFIX, &self.complaint_counter))
    }

    // prefix + zero-padded HHMMSS + counter
    fn compose(&self, prefix: &str, counter: &AtomicU64) -> String {
        let sequence = counter.fetch_add(1, Ordering::Relaxed);
        let clock = Utc::now().format("%H%M%S");
        format!("{prefix}{clock}{sequence}")
    }
}

impl Default for KeyAllocator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn digits(s: &str) -> bool {
        !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
    }

    #[test]
    fn bill_key_format() {
        let allocator = KeyAllocator::new();
        let key = allocator.next_bill_key();
        let rest = key.as_str().strip_prefix("ebm").unwrap();
        // 6-digit zero-padded time followed by the counter
        assert!(rest.len() >= 9, "expected HHMMSS + counter, got {rest}");
        assert!(digits(rest));
        assert!(rest.ends_with("100"));
    }

    #[test]
    fn payment_and_complaint_counters_start_at_500() {
        let allocator = KeyAllocator::new();
        assert!(allocator.next_payment_key().as_str().ends_with("500"));
        assert!(allocator.next_complaint_key().as_str().ends_with("500"));
    }

    #[test]
    fn counters_are_independent_per_category() {
        let allocator = KeyAllocator::new();
        for _ in 0..5 {
            allocator.next_bill_key();
        }
        // Bill allocations must not advance the payment counter.
        assert!(allocator.next_payment_key().as_str().ends_with("500"));
        assert!(allocator.next_bill_key().as_str().ends_with("105"));
    }

    #[test]
    fn counters_can_be_seeded() {
        let allocator = KeyAllocator::with_counters(1, 2, 3);
        assert!(allocator.next_bill_key().as_str().ends_with('1'));
        assert!(allocator.next_payment_key().as_str().ends_with('2'));
        assert!(allocator.next_complaint_key().as_str().ends_with('3'));
    }
}
