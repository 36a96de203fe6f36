//! Request/response data transfer objects
//!
//! Requests carry `validator` derives and are checked in the handlers
//! before touching the domain; responses are built from domain types.

pub mod auth;
pub mod bills;
pub mod complaints;
pub mod customers;
