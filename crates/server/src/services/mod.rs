//! Business logic services.
//!
//! # Services
//!
//! - `customer` - Customer use cases (thin pass-through over the repository)

pub mod customer;

pub use customer::{CustomerService, ServiceError};
