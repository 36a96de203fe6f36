//! Request handlers

pub mod auth;
pub mod bills;
pub mod complaints;
pub mod customers;
pub mod health;
