//! Customer domain types.
//!
//! [`Customer`] is the stored representation; only the repository produces it.
//! Handlers build [`CustomerFields`] from request bodies and never construct a
//! `Customer` directly.

use chrono::{DateTime, Utc};
use serde::Serialize;

use customer_management_core::{CustomerId, Password};

/// A customer record as stored in the `customers` table.
///
/// Serializes every column, including the clear-text password. The list
/// endpoint returns this shape as-is, which exposes stored passwords to any
/// caller. `Debug` goes through [`Password`] and stays redacted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct Customer {
    /// Identifier assigned by the database on insert.
    pub id: CustomerId,
    /// Display name.
    pub name: String,
    /// Email address (unique across customers).
    pub email: String,
    /// Password, stored without hashing.
    pub password: Password,
    /// When the customer was created.
    pub created_at: DateTime<Utc>,
    /// When the customer was last updated.
    pub updated_at: DateTime<Utc>,
}

/// The mutable fields of a customer, used for both create and update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerFields {
    pub name: String,
    pub email: String,
    pub password: Password,
}
