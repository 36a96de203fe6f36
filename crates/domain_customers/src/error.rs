//! Customer domain errors

use thiserror::Error;

use core_kernel::PortError;

/// Errors raised by registration, login, and account administration.
#[derive(Debug, Error)]
pub enum CustomerError {
    /// Registration conflict: the email is already in use
    #[error("Email already registered: {0}")]
    EmailAlreadyRegistered(String),

    /// Registration conflict: the consumer number is already in use
    #[error("Consumer ID already registered: {0}")]
    ConsumerKeyTaken(String),

    /// Login failed; deliberately does not say which part was wrong
    #[error("Invalid username or password")]
    InvalidCredentials,

    /// Credentials were right but the account has been deactivated
    #[error("Account is inactive. Please contact support.")]
    AccountInactive,

    /// The consumer key or user id does not resolve to a customer
    #[error("Customer not found: {0}")]
    CustomerNotFound(String),

    /// The user id does not resolve
    #[error("User not found: {0}")]
    UserNotFound(String),

    /// Persistence failure
    #[error(transparent)]
    Store(#[from] PortError),
}
