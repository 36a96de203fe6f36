//! Shared port contracts
//!
//! Ports define what the domain layer needs from its surroundings without
//! naming a concrete implementation. The database adapters in `infra_db` and
//! the in-memory stores in `test_utils` both implement these traits.

use async_trait::async_trait;
use thiserror::Error;

use crate::keys::ConsumerKey;

/// Errors surfaced by port implementations.
///
/// Adapters translate their native failures (SQL errors, pool exhaustion)
/// into these variants; domain services then decide how each maps into the
/// domain error taxonomy.
#[derive(Debug, Error)]
pub enum PortError {
    /// The referenced record does not exist
    #[error("not found: {0}")]
    NotFound(String),

    /// A uniqueness or referential constraint was violated
    #[error("conflict: {0}")]
    Conflict(String),

    /// The backing store failed in an unexpected way
    #[error("storage failure: {0}")]
    Storage(String),
}

impl PortError {
    /// Shorthand for a storage failure with a formatted message
    pub fn storage(message: impl Into<String>) -> Self {
        PortError::Storage(message.into())
    }
}

/// Lookup of customer accounts by consumer key.
///
/// The billing ledger and the complaint desk only need to know whether a
/// consumer key resolves to a registered customer; the full customer record
/// stays inside the customer domain.
#[async_trait]
pub trait CustomerDirectory: Send + Sync {
    /// Returns true if the consumer key resolves to a registered customer.
    async fn exists(&self, consumer: &ConsumerKey) -> Result<bool, PortError>;
}
