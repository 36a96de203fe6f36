//! Core Kernel - Foundational types and utilities for the billing system
//!
//! This crate provides the fundamental building blocks used across all domain modules:
//! - Business-key newtypes for bills, payments, complaints, and consumers
//! - The key allocator that produces human-readable business identifiers
//! - Keyed locking for per-bill mutual exclusion
//! - Shared port contracts and errors

pub mod keys;
pub mod allocator;
pub mod locks;
pub mod ports;
pub mod error;

pub use keys::{BillKey, PaymentKey, ComplaintKey, ConsumerKey};
pub use allocator::{KeyAllocator, MAX_KEY_ATTEMPTS};
pub use locks::KeyedLock;
pub use ports::{CustomerDirectory, PortError};
pub use error::KeyAllocationError;
