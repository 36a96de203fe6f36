//! Customer Domain - Accounts, Registration, and Login
//!
//! Customers and admins share a `User` login record; customers additionally
//! have a `Customer` account carrying the consumer number that bills and
//! complaints reference. Registration enforces unique emails and consumer
//! numbers; login is a credential comparison returning the user's identity
//! for the API layer to mint a session token from.

pub mod customer;
pub mod user;
pub mod accounts;
pub mod registration;
pub mod login;
pub mod ports;
pub mod error;

pub use customer::{Customer, CustomerProfile};
pub use user::{AccountStatus, User, UserRole};
pub use accounts::CustomerAccounts;
pub use registration::{RegistrationService, RegisterCustomer, RegisterAdmin};
pub use login::{LoginService, LoginOutcome};
pub use ports::{CustomerStore, UserStore};
pub use error::CustomerError;
