//! PostgreSQL adapters for the domain ports
//!
//! Each adapter encapsulates the SQL for one aggregate and maps between
//! database rows and domain types. Business keys are the primary keys;
//! `save` is an upsert so domain services can treat create and update
//! uniformly.

pub mod bills;
pub mod complaints;
pub mod customers;
pub mod users;

pub use bills::PgBillStore;
pub use complaints::PgComplaintStore;
pub use customers::PgCustomerStore;
pub use users::PgUserStore;
