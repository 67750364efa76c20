//! Domain models for the customer service.

pub mod customer;

pub use customer::{Customer, CustomerFields};
