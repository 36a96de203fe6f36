//! Complaint Domain - Customer Service Complaints
//!
//! Complaints are filed by customers against their account, triaged by
//! admins, and closed with a response. Customers may edit or withdraw a
//! complaint only while it is still `Open`; once an admin picks it up the
//! record is frozen for the customer.

pub mod complaint;
pub mod desk;
pub mod ports;
pub mod error;

pub use complaint::{Complaint, ComplaintStatus, FileComplaint, EditComplaint};
pub use desk::ComplaintDesk;
pub use ports::ComplaintStore;
pub use error::ComplaintError;
