//! Core error types used across the system

use thiserror::Error;

/// Raised when the allocate-check-retry loop for a business key exhausts its
/// attempt budget without finding an unused value.
///
/// The allocator only provides entropy; uniqueness is enforced by callers
/// checking each candidate against the persistence layer. A full loop means
/// either pathological clock alignment or a store that keeps reporting every
/// candidate as taken.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("could not allocate a unique {category} key after {attempts} attempts")]
pub struct KeyAllocationError {
    /// Key category that failed ("bill", "payment", "complaint")
    pub category: &'static str,
    /// Number of attempts made before giving up
    pub attempts: usize,
}

impl KeyAllocationError {
    /// Creates an allocation failure for the given category
    pub fn new(category: &'static str, attempts: usize) -> Self {
        Self { category, attempts }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_names_category_and_attempts() {
        let err = KeyAllocationError::new("bill", 32);
        assert_eq!(
            err.to_string(),
            "could not allocate a unique bill key after 32 attempts"
        );
    }
}
